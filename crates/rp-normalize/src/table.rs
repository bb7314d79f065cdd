//! Comma-delimited table parsing.

use crate::error::{ParseError, ParseResult};
use csv::{ReaderBuilder, Trim};
use tracing::{debug, info};

/// Header-plus-rows view of a CSV payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    index_dropped: bool,
}

impl Table {
    /// Parse delimited text with a header row.
    ///
    /// A first column with an empty header is an unnamed row index (what a
    /// dataframe export writes) and is discarded. Every row must have the
    /// same number of fields as the header.
    pub fn parse(text: &str) -> ParseResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        // A header row of just "" means no columns at all.
        if headers.len() == 1 && headers[0].is_empty() {
            headers.clear();
        }

        let index_dropped = headers.len() > 1 && headers[0].is_empty();
        if index_dropped {
            headers.remove(0);
            debug!("Dropped unnamed index column");
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let skip = usize::from(index_dropped);
            rows.push(record.iter().skip(skip).map(str::to_string).collect());
        }

        info!(columns = ?headers, rows = rows.len(), "Parsed CSV table");

        let table = Self {
            headers,
            rows,
            index_dropped,
        };

        if table.headers.is_empty() || table.rows.is_empty() {
            return Err(ParseError::EmptyTable {
                columns: table.headers,
                rows: table.rows.len(),
            });
        }

        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether a leading unnamed index column was removed.
    pub fn index_dropped(&self) -> bool {
        self.index_dropped
    }

    /// Position of a named column.
    ///
    /// Exact match wins; otherwise the first ASCII case-insensitive match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .or_else(|| self.headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
    }

    /// Position of a column that must be present.
    ///
    /// # Errors
    /// Returns `ParseError::MissingColumn` naming the column.
    pub fn require_column(&self, name: &str) -> ParseResult<usize> {
        self.column_index(name)
            .ok_or_else(|| ParseError::MissingColumn(name.to_string()))
    }
}
