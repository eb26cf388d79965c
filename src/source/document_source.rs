use crate::source::{ListingSource, SourceError};
use crate::types::{Document, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::task::spawn_blocking;
use tracing::debug;

/// A dump of a document collection on disk, as written by `mongoexport`.
///
/// Both a single JSON array and JSON Lines (one document per line) are accepted.
pub struct DocumentFileSource {
    path: PathBuf
}

impl DocumentFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse_documents(content: &str, path: &Path) -> Result<Vec<Document>, SourceError> {
        let trimmed = content.trim_start();

        let values: Vec<serde_json::Value> = if trimmed.starts_with('[') {
            serde_json::from_str(trimmed)
                .map_err(|source| SourceError::Json { path: path.to_path_buf(), line: source.line(), source })?
        } else {
            content.lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(index, line)| {
                    serde_json::from_str(line)
                        .map_err(|source| SourceError::Json { path: path.to_path_buf(), line: index + 1, source })
                })
                .collect::<Result<_, _>>()?
        };

        values.into_iter()
            .enumerate()
            .map(|(index, value)| match Value::from(value) {
                Value::Mapping(entries) => Ok(entries),
                _ => Err(SourceError::NotADocument { path: path.to_path_buf(), index })
            })
            .collect()
    }
}

impl ListingSource for DocumentFileSource {
    fn describe(&self) -> String {
        format!("document dump [{}]", self.path.display())
    }

    async fn fetch(&self) -> Result<Vec<Document>, SourceError> {
        let path = self.path.clone();

        spawn_blocking(move || {
            let content = fs::read_to_string(&path)
                .map_err(|source| SourceError::Io { path: path.clone(), source })?;
            let documents = DocumentFileSource::parse_documents(&content, &path)?;

            debug!("Read {} documents from [{}]", documents.len(), path.display());

            Ok(documents)
        }).await?
    }
}
