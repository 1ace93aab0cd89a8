//! Shared helpers for document generation.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Escape text for interpolation into HTML.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape text and turn newlines into `<br>` for multi-line fields such
/// as the company address and notes.
pub fn escape_html_multiline(value: &str) -> String {
    escape_html(value).replace("\r\n", "<br>").replace('\n', "<br>")
}

/// Sanitize a string for use in filenames.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut result = String::new();
    let mut last_dash = false;

    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if ch.is_whitespace() || ch == '-' || ch == '_' || ch == '.' {
            if !last_dash && !result.is_empty() {
                result.push('-');
                last_dash = true;
            }
        }
    }

    let trimmed = result.trim_matches('-');
    if trimmed.is_empty() {
        return fallback.to_string();
    }
    trimmed.to_string()
}

/// Get the static assets directory path.
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

/// Load the company logo as a data URI, if one exists.
///
/// `PAYSLIP_LOGO` overrides the default `static/logo.png` location. A
/// missing or unreadable logo is not an error; payslips render without
/// one.
pub fn load_logo_data_uri() -> Option<String> {
    let path = match env::var("PAYSLIP_LOGO") {
        Ok(custom) => PathBuf::from(custom),
        Err(_) => get_static_dir().join("logo.png"),
    };

    let bytes = fs::read(&path).ok()?;
    let mime = mime_guess::from_path(&path).first_or(mime_guess::mime::IMAGE_PNG);
    Some(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"A & B"</b>"#),
            "&lt;b&gt;&quot;A &amp; B&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_html_multiline() {
        assert_eq!(
            escape_html_multiline("Ajah, Lagos\nPincode : 1110001"),
            "Ajah, Lagos<br>Pincode : 1110001"
        );
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("BRG-2025-001", "employee"), "brg-2025-001");
        assert_eq!(sanitize_filename("October 2025", "month"), "october-2025");
        assert_eq!(sanitize_filename("  ", "month"), "month");
        assert_eq!(sanitize_filename("a//b", "x"), "ab");
    }
}
