//! JSON artifact writer for the realized price series.
//!
//! Writes the normalized `OutputDocument` to a fixed path for static
//! consumers (dashboards, sites). Each run fully replaces the file.

pub mod error;
pub mod writer;

pub use error::{PersistenceError, PersistenceResult};
pub use writer::{JsonDocumentWriter, WriteSummary, DEFAULT_OUTPUT_PATH};
