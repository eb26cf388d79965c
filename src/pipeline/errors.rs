use crate::models::Field;
use crate::source::SourceError;
use thiserror::Error;

/// Failures that abort a pipeline run. Row-level defects are reported as
/// [`crate::models::RowMalformation`] instead and never end up here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Source unavailable [{description}]: {source}")]
    SourceUnavailable {
        description: String,
        source: SourceError
    },
    #[error("Schema violation in column [{column}]: {reason}")]
    SchemaViolation {
        column: String,
        reason: String
    }
}

impl PipelineError {
    pub fn source_unavailable(description: String, source: SourceError) -> Self {
        Self::SourceUnavailable { description, source }
    }

    pub fn missing_column(field: Field) -> Self {
        Self::SchemaViolation {
            column: field.name().to_string(),
            reason: format!("no source column matches any of {:?}", field.aliases())
        }
    }

    pub fn unusable_column(column: &str, reason: impl Into<String>) -> Self {
        Self::SchemaViolation {
            column: column.to_string(),
            reason: reason.into()
        }
    }
}
