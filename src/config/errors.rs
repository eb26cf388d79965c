use crate::source::SourceError;
use crate::views::FilterError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file [{path}]: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Failed to parse config file [{path}]: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error
    },
    #[error("No source path configured for source kind [{0}]")]
    MissingSourcePath(&'static str),
    #[error("Delimiter [{0}] is not a single ASCII character")]
    InvalidDelimiter(char),
    #[error("Invalid filters: {0}")]
    Filters(#[from] FilterError),
    #[error(transparent)]
    Source(#[from] SourceError)
}
