use crate::models::{AvailabilityCategory, Coordinates, ListingRecord};
use crate::types::Price;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

pub const HISTOGRAM_BUCKETS: usize = 30;
pub const TOP_REVIEWED: usize = 10;
pub const UNKNOWN_GROUP: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: Price
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize
}

/// Price interval `[lower, upper)`; the last bucket also holds `upper`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBucket {
    pub lower: Decimal,
    pub upper: Decimal,
    pub count: usize,
    /// Count per room type. Empty when the dataset has no room types.
    pub facets: BTreeMap<String, usize>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopListing {
    pub id: Option<String>,
    pub name: Option<String>,
    pub neighbourhood: Option<String>,
    pub room_type: Option<String>,
    pub price: Price,
    pub reviews_per_month: Decimal
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub id: Option<String>,
    pub name: Option<String>,
    pub neighbourhood: Option<String>,
    pub price: Price,
    pub longitude: f64,
    pub latitude: f64
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapView {
    pub center: Option<Coordinates>,
    pub points: Vec<MapPoint>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationPoint {
    pub id: Option<String>,
    pub days: i64
}

fn group_key(key: Option<&str>) -> String {
    key.unwrap_or(UNKNOWN_GROUP).to_string()
}

/// Sum of price per key, sorted by key. Listings without a key count towards [`UNKNOWN_GROUP`].
/// `None` when any group total overflows.
pub fn sum_by<F>(listings: &[&ListingRecord], key: F) -> Option<Vec<GroupTotal>>
where
    F: Fn(&ListingRecord) -> Option<&str>
{
    let mut totals: BTreeMap<String, Price> = BTreeMap::new();

    for listing in listings {
        let total = totals.entry(group_key(key(listing))).or_default();
        *total = total.checked_add(listing.price)?;
    }

    Some(totals.into_iter()
        .map(|(key, total)| GroupTotal { key, total })
        .collect())
}

pub fn count_by<F>(listings: &[&ListingRecord], key: F) -> Vec<GroupCount>
where
    F: Fn(&ListingRecord) -> Option<&str>
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for listing in listings {
        *counts.entry(group_key(key(listing))).or_default() += 1;
    }

    counts.into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect()
}

/// Listings per availability bucket, in bucket order. Unbucketed listings are left out.
pub fn count_by_availability(listings: &[&ListingRecord]) -> Vec<GroupCount> {
    AvailabilityCategory::ALL.iter()
        .map(|category| GroupCount {
            key: category.label().to_string(),
            count: listings.iter().filter(|listing| listing.availability_category == Some(*category)).count()
        })
        .collect()
}

/// Equal-width price buckets between the lowest and highest price.
///
/// When every price is the same there is nothing to split and a single bucket is returned.
pub fn price_histogram(listings: &[&ListingRecord], faceted: bool) -> Vec<HistogramBucket> {
    let Some(lowest) = listings.iter().map(|listing| listing.price.value()).min() else {
        return Vec::new();
    };
    let highest = listings.iter().map(|listing| listing.price.value()).max().unwrap_or(lowest);

    let count = if highest == lowest { 1 } else { HISTOGRAM_BUCKETS };
    let width = (highest - lowest) / Decimal::from(count as u64);

    let mut buckets: Vec<HistogramBucket> = (0..count)
        .map(|index| HistogramBucket {
            lower: bucket_edge(lowest, width, index, highest),
            upper: if index + 1 == count { highest } else { bucket_edge(lowest, width, index + 1, highest) },
            count: 0,
            facets: BTreeMap::new()
        })
        .collect();

    for listing in listings {
        let index = if width.is_zero() {
            0
        } else {
            (listing.price.value() - lowest).checked_div(width)
                .and_then(|offset| offset.floor().to_usize())
                .unwrap_or(0)
                .min(count - 1)
        };

        let bucket = &mut buckets[index];
        bucket.count += 1;

        if faceted {
            *bucket.facets.entry(group_key(listing.room_type.as_deref())).or_default() += 1;
        }
    }

    buckets
}

//NOTE: Rounding of `width` may push an edge past the highest price
fn bucket_edge(lowest: Decimal, width: Decimal, index: usize, highest: Decimal) -> Decimal {
    width.checked_mul(Decimal::from(index as u64))
        .and_then(|offset| lowest.checked_add(offset))
        .map_or(highest, |edge| edge.min(highest))
}

/// The `limit` listings with the most reviews per month. The sort is stable, so ties keep dataset order.
pub fn top_reviewed(listings: &[&ListingRecord], limit: usize) -> Vec<TopListing> {
    let mut reviewed: Vec<(&ListingRecord, Decimal)> = listings.iter()
        .filter_map(|listing| Some((*listing, listing.reviews_per_month?)))
        .collect();

    reviewed.sort_by(|left, right| right.1.cmp(&left.1));

    reviewed.into_iter()
        .take(limit)
        .map(|(listing, reviews_per_month)| TopListing {
            id: listing.id.clone(),
            name: listing.name.clone(),
            neighbourhood: listing.neighbourhood.clone(),
            room_type: listing.room_type.clone(),
            price: listing.price,
            reviews_per_month
        })
        .collect()
}

pub fn map_view(listings: &[&ListingRecord]) -> MapView {
    let points: Vec<MapPoint> = listings.iter()
        .filter_map(|listing| {
            let coordinates = listing.coordinates?;

            Some(MapPoint {
                id: listing.id.clone(),
                name: listing.name.clone(),
                neighbourhood: listing.neighbourhood.clone(),
                price: listing.price,
                longitude: coordinates.longitude,
                latitude: coordinates.latitude
            })
        })
        .collect();

    let center = (!points.is_empty()).then(|| {
        let count = points.len() as f64;
        let longitude = points.iter().map(|point| point.longitude).sum::<f64>() / count;
        let latitude = points.iter().map(|point| point.latitude).sum::<f64>() / count;

        Coordinates::new(longitude, latitude)
    });

    MapView { center, points }
}

pub fn availability_durations(listings: &[&ListingRecord]) -> Vec<DurationPoint> {
    listings.iter()
        .filter_map(|listing| {
            Some(DurationPoint {
                id: listing.id.clone(),
                days: listing.availability_duration_days?
            })
        })
        .collect()
}
