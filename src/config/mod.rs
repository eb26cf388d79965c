mod errors;

use crate::pipeline::Pipeline;
#[cfg(feature = "mongo")]
use crate::source::MongoSource;
use crate::source::{CsvSource, DocumentFileSource, SelectedSource};
use crate::views::Filters;
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub use errors::ConfigError;

const DOCUMENT_EXTENSIONS: [&str; 3] = ["json", "jsonl", "ndjson"];

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Mongo,
    #[default]
    File
}

impl SourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Mongo => "mongo",
            SourceKind::File => "file"
        }
    }
}

/// Everything a run needs, read from `config.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source: SourceConfig,
    pub pipeline: PipelineConfig,
    pub filters: Filters,
    pub output: OutputConfig
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub source_kind: SourceKind,
    pub source_path: Option<PathBuf>,
    pub connection_uri: Option<String>,
    pub database: String,
    pub collection: String,
    pub delimiter: char
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            source_kind: SourceKind::default(),
            source_path: None,
            connection_uri: None,
            database: "sample_airbnb".to_string(),
            collection: "listingsAndReviews".to_string(),
            delimiter: ','
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub expand_nested: bool
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            expand_nested: true
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub cache_path: PathBuf,
    pub write_cache: bool,
    pub prefer_cache: bool
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from("cleaned_airbnb_data.csv"),
            write_cache: true,
            prefer_cache: false
        }
    }
}

/// Values given on the command line. Each one that is set wins over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub source_kind: Option<SourceKind>,
    pub source_path: Option<PathBuf>,
    pub connection_uri: Option<String>,
    pub neighbourhoods: Vec<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_availability: Option<i64>,
    pub cache_path: Option<PathBuf>,
    pub no_cache: bool,
    pub prefer_cache: bool
}

impl Config {
    /// Reads the config file at `path`, or the defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Config::default());
        };

        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

        Config::parse(&content, path)
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(source_kind) = overrides.source_kind {
            self.source.source_kind = source_kind;
        }

        if overrides.source_path.is_some() {
            self.source.source_path = overrides.source_path;
        }

        if overrides.connection_uri.is_some() {
            self.source.connection_uri = overrides.connection_uri;
        }

        if !overrides.neighbourhoods.is_empty() {
            self.filters.neighbourhoods = overrides.neighbourhoods;
        }

        if overrides.min_price.is_some() {
            self.filters.min_price = overrides.min_price;
        }

        if overrides.max_price.is_some() {
            self.filters.max_price = overrides.max_price;
        }

        if overrides.min_availability.is_some() {
            self.filters.min_availability = overrides.min_availability;
        }

        if let Some(cache_path) = overrides.cache_path {
            self.output.cache_path = cache_path;
        }

        if overrides.no_cache {
            self.output.write_cache = false;
        }

        if overrides.prefer_cache {
            self.output.prefer_cache = true;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.source.delimiter.is_ascii() {
            return Err(ConfigError::InvalidDelimiter(self.source.delimiter));
        }

        self.filters.validate()?;

        Ok(())
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new().with_nested_expansion(self.pipeline.expand_nested)
    }

    /// Chooses where listings are read from.
    ///
    /// An existing cache wins when `prefer_cache` is set. Otherwise `file` picks
    /// a document dump or CSV by extension, and `mongo` queries the collection
    /// when a connection URI is set or falls back to a `mongoexport` dump.
    pub fn select_source(&self) -> Result<SelectedSource, ConfigError> {
        if self.output.prefer_cache && self.output.cache_path.is_file() {
            info!("Using cached dataset [{}]", self.output.cache_path.display());
            return Ok(SelectedSource::Csv(CsvSource::new(&self.output.cache_path)));
        }

        match self.source.source_kind {
            SourceKind::File => {
                let path = self.source_path()?;

                if is_document_dump(path) {
                    Ok(SelectedSource::Documents(DocumentFileSource::new(path)))
                } else {
                    Ok(SelectedSource::Csv(CsvSource::new(path).with_delimiter(self.source.delimiter as u8)))
                }
            }
            SourceKind::Mongo => match &self.source.connection_uri {
                Some(connection_uri) => self.mongo_source(connection_uri),
                None => Ok(SelectedSource::Documents(DocumentFileSource::new(self.source_path()?)))
            }
        }
    }

    fn source_path(&self) -> Result<&Path, ConfigError> {
        self.source.source_path.as_deref()
            .ok_or(ConfigError::MissingSourcePath(self.source.source_kind.name()))
    }

    #[cfg(feature = "mongo")]
    fn mongo_source(&self, connection_uri: &str) -> Result<SelectedSource, ConfigError> {
        Ok(SelectedSource::Mongo(MongoSource::new(connection_uri, &self.source.database, &self.source.collection)))
    }

    #[cfg(not(feature = "mongo"))]
    fn mongo_source(&self, _connection_uri: &str) -> Result<SelectedSource, ConfigError> {
        Err(crate::source::SourceError::Unsupported("querying MongoDB requires the `mongo` feature".to_string()).into())
    }
}

fn is_document_dump(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| DOCUMENT_EXTENSIONS.iter().any(|candidate| extension.eq_ignore_ascii_case(candidate)))
}
