//! Document generation - turns normalized payslip records into PDF files.
//!
//! The pipeline is template → headless Chromium → bytes: `template`
//! builds the printable HTML, `engine` drives the browser binary inside a
//! scoped temp directory, and `archive` packs batch output into a zip.

pub mod archive;
pub mod common;
pub mod engine;
pub mod template;

pub use archive::ArchiveBuilder;
pub use engine::RenderSession;

use thiserror::Error;

use crate::payslip::models::PayslipRecord;
use common::sanitize_filename;

/// Errors that can occur while rendering or packaging documents.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("no headless Chromium binary found; set PAYSLIP_CHROMIUM_BIN or install chromium")]
    BrowserNotFound,
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write page content: {0}")]
    WritePage(#[source] std::io::Error),
    #[error("Chromium execution failed: {0}")]
    BrowserIo(#[source] std::io::Error),
    #[error("Chromium exited with status {0}")]
    BrowserExit(i32),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
    #[error("failed to write archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Result of a successful payslip render.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
}

/// Render one normalized record to a named PDF through an open session.
pub fn generate_payslip_pdf(
    session: &RenderSession,
    record: &PayslipRecord,
    logo: Option<&str>,
) -> Result<GeneratedDocument, GeneratorError> {
    let html = template::build_html(record, logo);
    let pdf = session.render_pdf(&html)?;

    let filename = format!(
        "payslip-{}-{}.pdf",
        sanitize_filename(&record.employee_number, "employee"),
        sanitize_filename(&record.payslip_month, "month"),
    );

    Ok(GeneratedDocument { filename, pdf })
}
