use crate::source::{ListingSource, SourceError};
use crate::types::{Document, Value};
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document as BsonDocument};
use mongodb::Client;
use tracing::{debug, info};

/// A collection in a MongoDB deployment, read in full.
pub struct MongoSource {
    connection_uri: String,
    database: String,
    collection: String
}

impl MongoSource {
    pub fn new(connection_uri: impl Into<String>, database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            connection_uri: connection_uri.into(),
            database: database.into(),
            collection: collection.into()
        }
    }
}

impl ListingSource for MongoSource {
    fn describe(&self) -> String {
        //NOTE: The connection URI may embed credentials, so it never reaches the logs
        format!("mongodb collection [{}.{}]", self.database, self.collection)
    }

    async fn fetch(&self) -> Result<Vec<Document>, SourceError> {
        let client = Client::with_uri_str(&self.connection_uri).await?;
        let collection = client.database(&self.database).collection::<BsonDocument>(&self.collection);

        info!("Querying {}", self.describe());

        let mut cursor = collection.find(None, None).await?;
        let mut documents = Vec::new();

        while let Some(document) = cursor.try_next().await? {
            //NOTE: Relaxed extended JSON keeps Decimal128 prices and dates as `$numberDecimal`/`$date` wrappers
            match Value::from(Bson::Document(document).into_relaxed_extjson()) {
                Value::Mapping(entries) => documents.push(entries),
                other => debug!("Skipping non-document value of kind [{}]", other.kind())
            }
        }

        Ok(documents)
    }
}
