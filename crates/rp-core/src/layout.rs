//! Series layout and row policy selection.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output shape and column-selection rule for a run.
///
/// The layout is always chosen explicitly (config or CLI), never inferred
/// from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesLayout {
    /// `[{"date", "realized_price", "price"}, ...]` from the named
    /// `Date`, `realized_price` and `Price` columns.
    #[default]
    Records,
    /// `{"dates": [...], "realized_price": [...]}` from the named
    /// `Date` and `realized_price` columns.
    Columnar,
    /// `[{"date", "value"}, ...]` taking the first column as the date and the
    /// last column as the value.
    ///
    /// Deprecated compatibility path: depends on column order, kept only for
    /// consumers of the original single-value file.
    LastColumn,
}

impl SeriesLayout {
    /// Row policy used when none is configured.
    #[must_use]
    pub fn default_row_policy(&self) -> RowPolicy {
        match self {
            Self::LastColumn => RowPolicy::DropInvalid,
            Self::Records | Self::Columnar => RowPolicy::Strict,
        }
    }
}

impl std::fmt::Display for SeriesLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Records => write!(f, "records"),
            Self::Columnar => write!(f, "columnar"),
            Self::LastColumn => write!(f, "last_column"),
        }
    }
}

impl FromStr for SeriesLayout {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "records" => Ok(Self::Records),
            "columnar" => Ok(Self::Columnar),
            "last_column" => Ok(Self::LastColumn),
            _ => Err(CoreError::UnknownLayout(s.to_string())),
        }
    }
}

/// What to do with a row whose value cell is missing or not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Abort the parse on the first invalid value.
    Strict,
    /// Drop the row and keep going.
    DropInvalid,
}

impl std::fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::DropInvalid => write!(f, "drop_invalid"),
        }
    }
}

impl FromStr for RowPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "strict" => Ok(Self::Strict),
            "drop_invalid" => Ok(Self::DropInvalid),
            _ => Err(CoreError::UnknownRowPolicy(s.to_string())),
        }
    }
}
