use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Could not read [{path}]: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Could not read CSV from [{path}]: {source}")]
    Csv {
        path: PathBuf,
        source: csv::Error
    },
    #[error("Invalid JSON document in [{path}] at line [{line}]: {source}")]
    Json {
        path: PathBuf,
        line: usize,
        source: serde_json::Error
    },
    #[error("Document [{index}] in [{path}] is not an object")]
    NotADocument {
        path: PathBuf,
        index: usize
    },
    #[error("Source is not supported: {0}")]
    Unsupported(String),
    #[error("Background read failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[cfg(feature = "mongo")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error)
}
