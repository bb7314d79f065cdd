//! Output series types.
//!
//! A run produces exactly one `OutputDocument`. The document serializes
//! untagged, so the file on disk is the bare array or object consumers
//! expect for the selected layout.

use crate::error::{CoreError, Result};
use crate::layout::SeriesLayout;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the realized price series with the spot price alongside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub realized_price: f64,
    pub price: f64,
}

/// One day of a single-value series (positional layout).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Realized price stored as two index-aligned arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawColumnar")]
pub struct ColumnarSeries {
    dates: Vec<NaiveDate>,
    realized_price: Vec<f64>,
}

#[derive(Deserialize)]
struct RawColumnar {
    dates: Vec<NaiveDate>,
    realized_price: Vec<f64>,
}

impl TryFrom<RawColumnar> for ColumnarSeries {
    type Error = CoreError;

    fn try_from(raw: RawColumnar) -> Result<Self> {
        Self::from_parts(raw.dates, raw.realized_price)
    }
}

impl ColumnarSeries {
    /// Create an empty series with room for `capacity` days.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            dates: Vec::with_capacity(capacity),
            realized_price: Vec::with_capacity(capacity),
        }
    }

    /// Build from parallel arrays.
    ///
    /// # Errors
    /// Returns `CoreError::LengthMismatch` if the arrays differ in length.
    pub fn from_parts(dates: Vec<NaiveDate>, realized_price: Vec<f64>) -> Result<Self> {
        if dates.len() != realized_price.len() {
            return Err(CoreError::LengthMismatch {
                dates: dates.len(),
                values: realized_price.len(),
            });
        }
        Ok(Self {
            dates,
            realized_price,
        })
    }

    pub fn push(&mut self, date: NaiveDate, realized_price: f64) {
        self.dates.push(date);
        self.realized_price.push(realized_price);
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn realized_price(&self) -> &[f64] {
        &self.realized_price
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// The complete JSON artifact for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputDocument {
    /// Array of `{date, realized_price, price}` records.
    Records(Vec<PricePoint>),
    /// Array of `{date, value}` records.
    Points(Vec<ValuePoint>),
    /// `{dates, realized_price}` parallel arrays.
    Columnar(ColumnarSeries),
}

impl OutputDocument {
    /// Number of days in the document.
    pub fn len(&self) -> usize {
        match self {
            Self::Records(points) => points.len(),
            Self::Points(points) => points.len(),
            Self::Columnar(series) => series.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Layout that produces this document shape.
    pub fn layout(&self) -> SeriesLayout {
        match self {
            Self::Records(_) => SeriesLayout::Records,
            Self::Points(_) => SeriesLayout::LastColumn,
            Self::Columnar(_) => SeriesLayout::Columnar,
        }
    }

    /// First and last day covered, if any.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let (first, last) = match self {
            Self::Records(points) => (points.first()?.date, points.last()?.date),
            Self::Points(points) => (points.first()?.date, points.last()?.date),
            Self::Columnar(series) => (*series.dates.first()?, *series.dates.last()?),
        };
        Some((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    #[test]
    fn test_records_json_shape() {
        let doc = OutputDocument::Records(vec![PricePoint {
            date: day(1),
            realized_price: 6500.0,
            price: 7000.0,
        }]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"[{"date":"2020-01-01","realized_price":6500.0,"price":7000.0}]"#
        );
    }

    #[test]
    fn test_points_json_shape() {
        let doc = OutputDocument::Points(vec![ValuePoint {
            date: day(2),
            value: 1.5,
        }]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"[{"date":"2020-01-02","value":1.5}]"#);
    }

    #[test]
    fn test_columnar_json_shape() {
        let mut series = ColumnarSeries::with_capacity(2);
        series.push(day(1), 6500.0);
        series.push(day(2), 6600.0);
        let json = serde_json::to_string(&OutputDocument::Columnar(series)).unwrap();
        assert_eq!(
            json,
            r#"{"dates":["2020-01-01","2020-01-02"],"realized_price":[6500.0,6600.0]}"#
        );
    }

    #[test]
    fn test_untagged_deserialize_picks_matching_shape() {
        let records: OutputDocument = serde_json::from_str(
            r#"[{"date":"2020-01-01","realized_price":6500.0,"price":7000.0}]"#,
        )
        .unwrap();
        assert_eq!(records.layout(), SeriesLayout::Records);

        let points: OutputDocument =
            serde_json::from_str(r#"[{"date":"2020-01-01","value":3.0}]"#).unwrap();
        assert_eq!(points.layout(), SeriesLayout::LastColumn);

        let columnar: OutputDocument =
            serde_json::from_str(r#"{"dates":["2020-01-01"],"realized_price":[1.0]}"#).unwrap();
        assert_eq!(columnar.layout(), SeriesLayout::Columnar);
        assert_eq!(columnar.len(), 1);
    }

    #[test]
    fn test_columnar_rejects_mismatched_lengths() {
        let err = ColumnarSeries::from_parts(vec![day(1), day(2)], vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::LengthMismatch {
                dates: 2,
                values: 1
            }
        ));

        let parsed: std::result::Result<ColumnarSeries, _> =
            serde_json::from_str(r#"{"dates":["2020-01-01"],"realized_price":[]}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_date_range() {
        let doc = OutputDocument::Points(vec![
            ValuePoint {
                date: day(1),
                value: 1.0,
            },
            ValuePoint {
                date: day(5),
                value: 2.0,
            },
        ]);
        assert_eq!(doc.date_range(), Some((day(1), day(5))));
        assert_eq!(OutputDocument::Records(Vec::new()).date_range(), None);
        assert!(OutputDocument::Records(Vec::new()).is_empty());
    }
}
