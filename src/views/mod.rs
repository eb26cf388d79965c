mod aggregates;
mod errors;
mod filters;

use crate::models::Field;
use crate::pipeline::{CleanDataset, ColumnMap};
use crate::types::Price;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub use aggregates::{
    DurationPoint, GroupCount, GroupTotal, HistogramBucket, MapPoint, MapView, TopListing, HISTOGRAM_BUCKETS,
    TOP_REVIEWED, UNKNOWN_GROUP
};
pub use errors::{FilterError, ViewError};
pub use filters::Filters;

/// Aggregate views over the filtered working set.
///
/// Each view that depends on an optional column is built independently: a
/// missing column fails that view alone with [`ViewError::SchemaViolation`].
/// Price totals too large for a [`Price`] fail with [`ViewError::Overflow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSet {
    pub listing_count: usize,
    #[serde(serialize_with = "view_or_error")]
    pub price_total: Result<Price, ViewError>,
    #[serde(serialize_with = "view_or_error")]
    pub price_by_room_type: Result<Vec<GroupTotal>, ViewError>,
    #[serde(serialize_with = "view_or_error")]
    pub price_by_neighbourhood: Result<Vec<GroupTotal>, ViewError>,
    #[serde(serialize_with = "view_or_error")]
    pub count_by_room_type: Result<Vec<GroupCount>, ViewError>,
    #[serde(serialize_with = "view_or_error")]
    pub count_by_property_type: Result<Vec<GroupCount>, ViewError>,
    #[serde(serialize_with = "view_or_error")]
    pub count_by_availability: Result<Vec<GroupCount>, ViewError>,
    pub price_histogram: Vec<HistogramBucket>,
    #[serde(serialize_with = "view_or_error")]
    pub top_reviewed: Result<Vec<TopListing>, ViewError>,
    #[serde(serialize_with = "view_or_error")]
    pub map: Result<MapView, ViewError>,
    #[serde(serialize_with = "view_or_error")]
    pub availability_durations: Result<Vec<DurationPoint>, ViewError>
}

impl ViewSet {
    pub fn build(dataset: &CleanDataset, filters: &Filters) -> Self {
        let listings = filters.apply(&dataset.listings);
        let columns = &dataset.columns;

        let map = if columns.has_coordinates() {
            Ok(aggregates::map_view(&listings))
        } else {
            Err(ViewError::SchemaViolation { view: "map", column: Field::Coordinates.name() })
        };

        Self {
            listing_count: listings.len(),
            price_total: Price::checked_sum(listings.iter().map(|listing| listing.price))
                .ok_or(ViewError::Overflow { view: "price_total" }),
            price_by_room_type: require(columns, "price_by_room_type", &[Field::RoomType])
                .and_then(|_| aggregates::sum_by(&listings, |listing| listing.room_type.as_deref())
                    .ok_or(ViewError::Overflow { view: "price_by_room_type" })),
            price_by_neighbourhood: require(columns, "price_by_neighbourhood", &[Field::Neighbourhood])
                .and_then(|_| aggregates::sum_by(&listings, |listing| listing.neighbourhood.as_deref())
                    .ok_or(ViewError::Overflow { view: "price_by_neighbourhood" })),
            count_by_room_type: require(columns, "count_by_room_type", &[Field::RoomType])
                .map(|_| aggregates::count_by(&listings, |listing| listing.room_type.as_deref())),
            count_by_property_type: require(columns, "count_by_property_type", &[Field::PropertyType])
                .map(|_| aggregates::count_by(&listings, |listing| listing.property_type.as_deref())),
            count_by_availability: require(columns, "count_by_availability", &[Field::Availability365])
                .map(|_| aggregates::count_by_availability(&listings)),
            price_histogram: aggregates::price_histogram(&listings, columns.contains(Field::RoomType)),
            top_reviewed: require(columns, "top_reviewed", &[Field::ReviewsPerMonth])
                .map(|_| aggregates::top_reviewed(&listings, TOP_REVIEWED)),
            map,
            availability_durations: require(columns, "availability_durations", &[Field::AvailabilityStart, Field::AvailabilityEnd])
                .map(|_| aggregates::availability_durations(&listings))
        }
    }

    /// No listing passed the filters. Distinct from a failed run, which never produces a view set.
    pub fn is_empty(&self) -> bool {
        self.listing_count == 0
    }
}

fn require(columns: &ColumnMap, view: &'static str, fields: &[Field]) -> Result<(), ViewError> {
    match fields.iter().find(|field| !columns.contains(**field)) {
        Some(field) => Err(ViewError::SchemaViolation { view, column: field.name() }),
        None => Ok(())
    }
}

fn view_or_error<T, S>(view: &Result<T, ViewError>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer
{
    match view {
        Ok(view) => view.serialize(serializer),
        Err(error) => {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("error", &error.to_string())?;
            map.end()
        }
    }
}
