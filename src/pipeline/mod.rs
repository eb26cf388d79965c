mod columns;
mod errors;
mod report;
mod steps;

use crate::models::{AvailabilityCategory, Coordinates, Field, Frame, ListingRecord, RowMalformation};
use crate::source::ListingSource;
use crate::types::{Document, Price};
use steps::Derivation;
use tracing::{debug, info};

pub use columns::ColumnMap;
pub use errors::PipelineError;
pub use report::PipelineReport;

/// The output of a pipeline run.
///
/// `frame` holds every source column plus the derived ones and is what gets
/// persisted. `listings` is the typed projection of the same rows, in the same
/// order, that the views are built from.
#[derive(Debug, Clone)]
pub struct CleanDataset {
    pub frame: Frame,
    pub listings: Vec<ListingRecord>,
    pub columns: ColumnMap,
    pub report: PipelineReport
}

/// Listing normalization pipeline.
///
/// A run reads one snapshot of the source and applies, in order: expand,
/// flatten, deduplicate, impute, coerce, then the coordinate, duration and
/// availability derivations. Later steps rely on the earlier ones.
pub struct Pipeline {
    expand_nested: bool
}

struct Derived {
    coordinates: Option<Vec<Option<Coordinates>>>,
    durations: Option<Vec<Option<i64>>>,
    categories: Option<Vec<Option<AvailabilityCategory>>>
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            expand_nested: true
        }
    }

    /// When disabled, sub-documents are not expanded into dotted columns and get flattened to strings whole.
    pub fn with_nested_expansion(mut self, enabled: bool) -> Self {
        self.expand_nested = enabled;
        self
    }

    /// Fetches the snapshot from `source` and cleans it.
    pub async fn run<S: ListingSource>(&self, source: &S) -> Result<CleanDataset, PipelineError> {
        let description = source.describe();

        info!("Reading listings from {description}");

        let documents = source.fetch().await
            .map_err(|error| PipelineError::source_unavailable(description.clone(), error))?;

        let mut dataset = self.clean(documents)?;
        dataset.report.source = description;

        Ok(dataset)
    }

    /// Cleans an in-memory snapshot.
    pub fn clean(&self, documents: Vec<Document>) -> Result<CleanDataset, PipelineError> {
        let mut report = PipelineReport {
            documents_read: documents.len(),
            ..PipelineReport::default()
        };

        let documents: Vec<Document> = if self.expand_nested {
            documents.into_iter().map(steps::expand_document).collect()
        } else {
            documents
        };

        let mut frame = Frame::from_documents(documents);
        let columns = ColumnMap::resolve(frame.columns());
        let price_column = columns.get(Field::Price)
            .ok_or_else(|| PipelineError::missing_column(Field::Price))?;
        let id_column = columns.get(Field::Id);

        report.flattened_columns = steps::flatten(&mut frame);
        debug!("Flattened nested values in columns {:?}", report.flattened_columns);

        report.duplicates_removed = steps::deduplicate(&mut frame);
        debug!("Removed {} duplicate rows", report.duplicates_removed);

        let imputation = steps::impute_price(&mut frame, price_column)?;
        debug!("Imputed {} missing prices with median {}", imputation.filled, imputation.statistic);
        report.price_median = Some(imputation.statistic);
        report.prices_imputed = imputation.filled;

        if let Some(rating_column) = columns.get(Field::Rating) {
            if let Some(imputation) = steps::impute_rating(&mut frame, rating_column)? {
                debug!("Imputed {} missing ratings with mean {}", imputation.filled, imputation.statistic);
                report.rating_mean = Some(imputation.statistic);
                report.ratings_imputed = imputation.filled;
            }
        }

        let mut malformations = steps::coerce_prices(&mut frame, price_column, id_column);
        report.rows_dropped = malformations.iter().filter(|malformation| malformation.drops_row()).count();

        let coordinates = absorb(steps::derive_coordinates(&mut frame, &columns), &mut malformations);
        let durations = absorb(steps::derive_availability_duration(&mut frame, &columns), &mut malformations);
        let categories = absorb(steps::derive_availability_category(&mut frame, &columns), &mut malformations);

        let derived = Derived { coordinates, durations, categories };
        let listings = project_listings(&frame, &columns, price_column, &derived);

        report.listings = listings.len();
        report.malformations = malformations;

        info!(
            "Cleaned {} documents into {} listings ({} duplicates, {} prices imputed, {} rows dropped, {} row malformations)",
            report.documents_read,
            report.listings,
            report.duplicates_removed,
            report.prices_imputed,
            report.rows_dropped,
            report.malformations.len()
        );

        Ok(CleanDataset { frame, listings, columns, report })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn absorb<T>(derivation: Option<Derivation<T>>, malformations: &mut Vec<RowMalformation>) -> Option<Vec<Option<T>>> {
    derivation.map(|derivation| {
        malformations.extend(derivation.malformations);
        derivation.values
    })
}

fn project_listings(frame: &Frame, columns: &ColumnMap, price_column: usize, derived: &Derived) -> Vec<ListingRecord> {
    (0..frame.len())
        .filter_map(|row| {
            let label = |field: Field| columns.get(field).and_then(|column| frame.value(row, column).as_label());
            let decimal = |field: Field| columns.get(field).and_then(|column| frame.value(row, column).as_decimal());

            let price = Price::from_value(frame.value(row, price_column)).ok()?;

            Some(ListingRecord {
                id: label(Field::Id),
                name: label(Field::Name),
                price,
                rating: decimal(Field::Rating),
                neighbourhood: label(Field::Neighbourhood),
                room_type: label(Field::RoomType),
                property_type: label(Field::PropertyType),
                coordinates: derived.coordinates.as_ref().and_then(|values| values[row]),
                availability_365: columns.get(Field::Availability365).and_then(|column| frame.value(row, column).as_i64()),
                availability_category: derived.categories.as_ref().and_then(|values| values[row]),
                availability_duration_days: derived.durations.as_ref().and_then(|values| values[row]),
                reviews_per_month: decimal(Field::ReviewsPerMonth)
            })
        })
        .collect()
}
