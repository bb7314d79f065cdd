//! JSON document writer.
//!
//! Overwrite semantics:
//! - The whole file is replaced on every write (no merge, no append)
//! - Parent directories are created as needed
//! - No atomic rename: an interrupted write can leave a truncated file,
//!   and the next run rewrites it

use crate::error::PersistenceResult;
use rp_core::{OutputDocument, SeriesLayout};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output path relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "data/realized-price.json";

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub records: usize,
    pub layout: SeriesLayout,
}

/// Writer for the output document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonDocumentWriter {
    path: PathBuf,
}

impl JsonDocumentWriter {
    /// Create a writer for `path`. Nothing touches the filesystem until
    /// `write` is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `document` as pretty-printed JSON, replacing the file.
    pub fn write(&self, document: &OutputDocument) -> PersistenceResult<WriteSummary> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
                debug!(dir = %parent.display(), "Ensured output directory");
            }
        }

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, document)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        let summary = WriteSummary {
            path: self.path.clone(),
            records: document.len(),
            layout: document.layout(),
        };

        info!(
            path = %summary.path.display(),
            records = summary.records,
            layout = %summary.layout,
            "Wrote {} points to {}",
            summary.records,
            summary.path.display()
        );

        Ok(summary)
    }

    /// Read the document back from disk.
    pub fn read(&self) -> PersistenceResult<OutputDocument> {
        let file = File::open(&self.path)?;
        let document = serde_json::from_reader(BufReader::new(file))?;
        Ok(document)
    }
}
