use crate::types::Value;
use serde::Serialize;
use thiserror::Error;

/// A defect confined to a single row.
///
/// Malformed optional fields are nulled and the row is kept. A price that cannot
/// be parsed is the one exception: the row is dropped, since every cleaned
/// listing must carry a price.
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowMalformation {
    #[error("Row [{row}]:[{record}] has malformed coordinates [{value}] in column [{column}]")]
    Coordinates {
        row: usize,
        record: String,
        column: String,
        value: String
    },
    #[error("Row [{row}]:[{record}] has an unparseable timestamp [{value}] in column [{column}]")]
    Timestamp {
        row: usize,
        record: String,
        column: String,
        value: String
    },
    #[error("Row [{row}]:[{record}] has availability [{value}] in column [{column}] which cannot be bucketed")]
    Availability {
        row: usize,
        record: String,
        column: String,
        value: String
    },
    #[error("Row [{row}]:[{record}] has an unparseable price [{value}] in column [{column}] and was dropped")]
    Price {
        row: usize,
        record: String,
        column: String,
        value: String
    }
}

impl RowMalformation {
    pub fn coordinates(row: usize, record: &str, column: &str, value: &Value) -> Self {
        Self::Coordinates {
            row,
            record: record.to_string(),
            column: column.to_string(),
            value: value.to_string()
        }
    }

    pub fn timestamp(row: usize, record: &str, column: &str, value: &Value) -> Self {
        Self::Timestamp {
            row,
            record: record.to_string(),
            column: column.to_string(),
            value: value.to_string()
        }
    }

    pub fn availability(row: usize, record: &str, column: &str, value: &Value) -> Self {
        Self::Availability {
            row,
            record: record.to_string(),
            column: column.to_string(),
            value: value.to_string()
        }
    }

    pub fn price(row: usize, record: &str, column: &str, value: &Value) -> Self {
        Self::Price {
            row,
            record: record.to_string(),
            column: column.to_string(),
            value: value.to_string()
        }
    }

    /// Whether the row was removed from the cleaned dataset.
    pub fn drops_row(&self) -> bool {
        matches!(self, Self::Price { .. })
    }
}
