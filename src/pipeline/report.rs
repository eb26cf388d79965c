use crate::models::RowMalformation;
use rust_decimal::Decimal;
use serde::Serialize;

/// What a pipeline run did to its input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineReport {
    pub source: String,
    pub documents_read: usize,
    pub flattened_columns: Vec<String>,
    pub duplicates_removed: usize,
    pub price_median: Option<Decimal>,
    pub prices_imputed: usize,
    pub rating_mean: Option<Decimal>,
    pub ratings_imputed: usize,
    pub rows_dropped: usize,
    pub malformations: Vec<RowMalformation>,
    pub listings: usize
}
