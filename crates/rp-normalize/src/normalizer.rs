//! Series extraction from a parsed table.
//!
//! Column requirements per layout:
//! - `Records`: `Date`, `Price`, `realized_price`
//! - `Columnar`: `Date`, `realized_price`
//! - `LastColumn`: none by name; first column is the date, last is the value

use crate::error::{ParseError, ParseResult};
use crate::payload::unwrap_payload;
use crate::table::Table;
use chrono::NaiveDate;
use rp_core::{
    parse_metric_date, ColumnarSeries, OutputDocument, PricePoint, RowPolicy, SeriesLayout,
    ValuePoint,
};
use std::collections::HashSet;
use tracing::{info, warn};

/// Date column name.
pub const DATE_COLUMN: &str = "Date";
/// Spot price column name.
pub const PRICE_COLUMN: &str = "Price";
/// Realized price column name.
pub const REALIZED_PRICE_COLUMN: &str = "realized_price";

/// Normalizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub layout: SeriesLayout,
    pub row_policy: RowPolicy,
}

impl NormalizeOptions {
    /// Options for a layout with its default row policy.
    #[must_use]
    pub fn for_layout(layout: SeriesLayout) -> Self {
        Self {
            layout,
            row_policy: layout.default_row_policy(),
        }
    }

    #[must_use]
    pub fn with_row_policy(mut self, row_policy: RowPolicy) -> Self {
        self.row_policy = row_policy;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::for_layout(SeriesLayout::default())
    }
}

/// Turns raw response text into an `OutputDocument`.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

/// Outcome of converting one row's value cells.
enum RowValues<T> {
    Keep(T),
    Drop,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize a raw response body.
    ///
    /// Every failure is terminal: either a complete, non-empty document comes
    /// back or an error does.
    pub fn normalize(&self, raw: &str) -> ParseResult<OutputDocument> {
        let payload = unwrap_payload(raw)?;
        let table = Table::parse(&payload.text)?;

        info!(
            layout = %self.options.layout,
            row_policy = %self.options.row_policy,
            wrapped = payload.was_wrapped,
            index_dropped = table.index_dropped(),
            "Normalizing table"
        );

        let document = match self.options.layout {
            SeriesLayout::Records => self.extract_records(&table)?,
            SeriesLayout::Columnar => self.extract_columnar(&table)?,
            SeriesLayout::LastColumn => self.extract_last_column(&table)?,
        };

        // An empty series is never written; it would also read back as `Records`.
        if document.is_empty() {
            warn!(rows = table.row_count(), "No usable rows after extraction");
            return Err(ParseError::EmptyTable {
                columns: table.headers().to_vec(),
                rows: table.row_count(),
            });
        }

        info!(
            rows = table.row_count(),
            points = document.len(),
            "Extracted series"
        );

        Ok(document)
    }

    fn extract_records(&self, table: &Table) -> ParseResult<OutputDocument> {
        let date_idx = table.require_column(DATE_COLUMN)?;
        let price_idx = table.require_column(PRICE_COLUMN)?;
        let realized_idx = table.require_column(REALIZED_PRICE_COLUMN)?;

        let points = self.collect_rows(table, date_idx, |row_no, row| {
            let realized = self.value(table, row_no, row, realized_idx)?;
            let price = self.value(table, row_no, row, price_idx)?;
            Ok(match (realized, price) {
                (Some(realized_price), Some(price)) => RowValues::Keep((realized_price, price)),
                _ => RowValues::Drop,
            })
        })?;

        Ok(OutputDocument::Records(
            points
                .into_iter()
                .map(|(date, (realized_price, price))| PricePoint {
                    date,
                    realized_price,
                    price,
                })
                .collect(),
        ))
    }

    fn extract_columnar(&self, table: &Table) -> ParseResult<OutputDocument> {
        let date_idx = table.require_column(DATE_COLUMN)?;
        let realized_idx = table.require_column(REALIZED_PRICE_COLUMN)?;

        let points = self.collect_rows(table, date_idx, |row_no, row| {
            Ok(match self.value(table, row_no, row, realized_idx)? {
                Some(v) => RowValues::Keep(v),
                None => RowValues::Drop,
            })
        })?;

        let mut series = ColumnarSeries::with_capacity(points.len());
        for (date, realized_price) in points {
            series.push(date, realized_price);
        }
        Ok(OutputDocument::Columnar(series))
    }

    /// Deprecated positional extraction: first column is the date, last
    /// column is the value.
    fn extract_last_column(&self, table: &Table) -> ParseResult<OutputDocument> {
        if table.column_count() < 2 {
            return Err(ParseError::EmptyTable {
                columns: table.headers().to_vec(),
                rows: table.row_count(),
            });
        }
        let value_idx = table.column_count() - 1;

        warn!(
            value_column = %table.headers()[value_idx],
            "Using positional last-column extraction (deprecated)"
        );

        let points = self.collect_rows(table, 0, |row_no, row| {
            Ok(match self.value(table, row_no, row, value_idx)? {
                Some(v) => RowValues::Keep(v),
                None => RowValues::Drop,
            })
        })?;

        Ok(OutputDocument::Points(
            points
                .into_iter()
                .map(|(date, value)| ValuePoint { date, value })
                .collect(),
        ))
    }

    /// Walk the rows in order, parsing dates and letting `values` convert the
    /// value cells. Rows are numbered from 1 (first data row).
    fn collect_rows<T, F>(
        &self,
        table: &Table,
        date_idx: usize,
        mut values: F,
    ) -> ParseResult<Vec<(NaiveDate, T)>>
    where
        F: FnMut(usize, &[String]) -> ParseResult<RowValues<T>>,
    {
        let mut out = Vec::with_capacity(table.row_count());
        let mut seen = HashSet::with_capacity(table.row_count());
        let mut dropped = 0usize;
        let mut duplicates = 0usize;

        for (i, row) in table.rows().iter().enumerate() {
            let row_no = i + 1;
            let raw_date = &row[date_idx];
            let date = parse_metric_date(raw_date).map_err(|_| ParseError::InvalidDate {
                row: row_no,
                value: raw_date.clone(),
            })?;

            match values(row_no, row.as_slice())? {
                RowValues::Keep(v) => {
                    if !seen.insert(date) {
                        duplicates += 1;
                    }
                    out.push((date, v));
                }
                RowValues::Drop => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!(dropped, "Dropped rows with missing or invalid values");
        }
        if duplicates > 0 {
            warn!(duplicates, "Series contains repeated dates");
        }

        Ok(out)
    }

    /// Convert one value cell.
    ///
    /// `Ok(None)` means the row should be dropped (only under
    /// `RowPolicy::DropInvalid`).
    fn value(
        &self,
        table: &Table,
        row_no: usize,
        row: &[String],
        idx: usize,
    ) -> ParseResult<Option<f64>> {
        let cell = &row[idx];
        match parse_value(cell) {
            Some(v) => Ok(Some(v)),
            None => match self.options.row_policy {
                RowPolicy::DropInvalid => Ok(None),
                RowPolicy::Strict => Err(ParseError::InvalidValue {
                    row: row_no,
                    column: table.headers()[idx].clone(),
                    value: cell.clone(),
                }),
            },
        }
    }
}

/// Parse a finite float. Empty cells, `NaN` and infinities are invalid.
fn parse_value(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
