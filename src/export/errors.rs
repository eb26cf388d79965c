use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unable to create [{path}]: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Unable to write the cleaned dataset: {0}")]
    Csv(#[from] csv::Error)
}
