mod csv_source;
mod document_source;
mod errors;
#[cfg(feature = "mongo")]
mod mongo_source;

use crate::types::Document;

pub use csv_source::CsvSource;
pub use document_source::DocumentFileSource;
pub use errors::SourceError;
#[cfg(feature = "mongo")]
pub use mongo_source::MongoSource;

/// A read-only snapshot of listing records.
///
/// Every source hands the pipeline the same shape: a sequence of documents,
/// each mapping field names to values. Flat files yield flat documents, document
/// stores may yield nested ones.
#[allow(async_fn_in_trait)]
pub trait ListingSource {
    /// Short human-readable description for logs and errors.
    fn describe(&self) -> String;

    /// Reads the whole snapshot. Called once per pipeline run.
    async fn fetch(&self) -> Result<Vec<Document>, SourceError>;
}

/// The source chosen by configuration.
pub enum SelectedSource {
    Csv(CsvSource),
    Documents(DocumentFileSource),
    #[cfg(feature = "mongo")]
    Mongo(MongoSource)
}

impl ListingSource for SelectedSource {
    fn describe(&self) -> String {
        match self {
            SelectedSource::Csv(source) => source.describe(),
            SelectedSource::Documents(source) => source.describe(),
            #[cfg(feature = "mongo")]
            SelectedSource::Mongo(source) => source.describe()
        }
    }

    async fn fetch(&self) -> Result<Vec<Document>, SourceError> {
        match self {
            SelectedSource::Csv(source) => source.fetch().await,
            SelectedSource::Documents(source) => source.fetch().await,
            #[cfg(feature = "mongo")]
            SelectedSource::Mongo(source) => source.fetch().await
        }
    }
}
