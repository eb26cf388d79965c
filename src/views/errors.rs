use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Serialize)]
pub enum ViewError {
    #[error("View [{view}] needs column [{column}] which the dataset does not have")]
    SchemaViolation {
        view: &'static str,
        column: &'static str
    },
    #[error("View [{view}] total exceeds the largest representable price")]
    Overflow {
        view: &'static str
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Minimum price [{min}] is greater than maximum price [{max}]")]
    InvertedPriceRange {
        min: String,
        max: String
    },
    #[error("Minimum availability [{0}] is outside of 0-365")]
    AvailabilityOutOfRange(i64)
}
