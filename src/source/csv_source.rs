use crate::models::Field;
use crate::source::{ListingSource, SourceError};
use crate::types::{Document, Value};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tokio::task::spawn_blocking;
use tracing::{debug, error};

/// Delimited flat file with a header row.
pub struct CsvSource {
    path: PathBuf,
    delimiter: u8
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b','
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Reads every record of `reader`, skipping malformed ones.
    pub fn read_documents<R: Read>(reader: R, delimiter: u8, path: &Path) -> Result<Vec<Document>, SourceError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()
            .map_err(|source| SourceError::Csv { path: path.to_path_buf(), source })?
            .iter()
            .map(str::to_string)
            .collect();

        let identifiers: Vec<bool> = headers.iter().map(|header| Field::Id.matches(header)).collect();
        let mut documents = Vec::new();

        for (index, result) in reader.records().enumerate() {
            match result {
                Ok(record) => {
                    let document: Document = headers.iter()
                        .zip(&identifiers)
                        .zip(record.iter())
                        .map(|((header, identifier), cell)| (header.clone(), read_cell(cell, *identifier)))
                        .collect();

                    documents.push(document);
                }
                Err(error) => {
                    error!("CSV record [{index}] in [{}] skipped: {error}", path.display());
                }
            }
        }

        debug!("Read {} records from [{}]", documents.len(), path.display());

        Ok(documents)
    }
}

//NOTE: Identifiers such as "00123" are opaque and keep their text
fn read_cell(cell: &str, identifier: bool) -> Value {
    if identifier && !cell.is_empty() {
        Value::Text(cell.to_string())
    } else {
        Value::infer(cell)
    }
}

impl ListingSource for CsvSource {
    fn describe(&self) -> String {
        format!("csv file [{}]", self.path.display())
    }

    async fn fetch(&self) -> Result<Vec<Document>, SourceError> {
        let path = self.path.clone();
        let delimiter = self.delimiter;

        spawn_blocking(move || {
            let file = File::open(&path)
                .map_err(|source| SourceError::Io { path: path.clone(), source })?;

            CsvSource::read_documents(BufReader::new(file), delimiter, &path)
        }).await?
    }
}
