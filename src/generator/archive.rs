//! Zip packaging for batch output.

use std::io::{Cursor, Write};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::GeneratorError;

/// In-memory zip builder. Members appear in the order they are added,
/// which the batch pipeline relies on to mirror input row order.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    pub fn add_file(&mut self, name: &str, bytes: &[u8]) -> Result<(), GeneratorError> {
        self.writer.start_file(name, SimpleFileOptions::default())?;
        self.writer.write_all(bytes).map_err(ZipError::Io)?;
        Ok(())
    }

    pub fn finish(self) -> Result<Vec<u8>, GeneratorError> {
        let cursor = self.writer.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}
