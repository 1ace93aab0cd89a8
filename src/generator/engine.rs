//! Headless Chromium rendering engine.
//!
//! Handles the low-level details of writing page content to a scoped
//! temporary directory, invoking the browser binary, and collecting the
//! output PDF. One [`RenderSession`] is opened per request; a batch
//! reuses its session across every row, replacing the page content each
//! time, and the temp directory is released exactly once when the
//! session drops - on the success and failure paths alike.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::{tempdir, TempDir};

use super::GeneratorError;

const PAGE_FILE: &str = "page.html";
const OUTPUT_FILE: &str = "payslip.pdf";

const BROWSER_CANDIDATES: [&str; 5] = [
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

/// A scoped rendering session backed by one browser binary and one
/// working directory.
pub struct RenderSession {
    browser: PathBuf,
    workdir: TempDir,
}

impl RenderSession {
    /// Locate the browser and create the session working directory.
    pub fn open() -> Result<Self, GeneratorError> {
        let browser = find_browser()?;
        let workdir = tempdir().map_err(GeneratorError::TempDir)?;
        log::debug!("Opened render session with {}", browser.display());
        Ok(Self { browser, workdir })
    }

    /// Render an HTML string to PDF bytes.
    ///
    /// Overwrites the session page file, so consecutive calls replace
    /// the page content rather than accumulating files.
    pub fn render_pdf(&self, html: &str) -> Result<Vec<u8>, GeneratorError> {
        let page_path = self.workdir.path().join(PAGE_FILE);
        let output_path = self.workdir.path().join(OUTPUT_FILE);

        fs::write(&page_path, html).map_err(GeneratorError::WritePage)?;

        let status = Command::new(&self.browser)
            .arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", output_path.display()))
            .arg(&page_path)
            .current_dir(self.workdir.path())
            .status()
            .map_err(GeneratorError::BrowserIo)?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(GeneratorError::BrowserExit(code));
        }

        fs::read(&output_path).map_err(GeneratorError::ReadPdf)
    }
}

/// Resolve the browser binary: explicit env override first, then
/// well-known names on PATH.
fn find_browser() -> Result<PathBuf, GeneratorError> {
    if let Ok(path) = env::var("PAYSLIP_CHROMIUM_BIN") {
        return Ok(PathBuf::from(path));
    }

    BROWSER_CANDIDATES
        .iter()
        .find_map(|name| find_on_path(name))
        .ok_or(GeneratorError::BrowserNotFound)
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
