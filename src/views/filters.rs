use crate::models::{ListingRecord, AVAILABILITY_HORIZON_DAYS};
use crate::views::FilterError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// User-adjustable narrowing of the working set. Every criterion that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    /// Empty means every neighbourhood.
    pub neighbourhoods: Vec<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_availability: Option<i64>
}

impl Filters {
    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(FilterError::InvertedPriceRange { min: min.to_string(), max: max.to_string() });
            }
        }

        if let Some(days) = self.min_availability {
            if !(0..=AVAILABILITY_HORIZON_DAYS).contains(&days) {
                return Err(FilterError::AvailabilityOutOfRange(days));
            }
        }

        Ok(())
    }

    pub fn matches(&self, listing: &ListingRecord) -> bool {
        if !self.neighbourhoods.is_empty() {
            let Some(neighbourhood) = listing.neighbourhood.as_deref() else {
                return false;
            };

            if !self.neighbourhoods.iter().any(|selected| selected == neighbourhood) {
                return false;
            }
        }

        let price = listing.price.value();

        if self.min_price.is_some_and(|min| price < min) || self.max_price.is_some_and(|max| price > max) {
            return false;
        }

        match self.min_availability {
            Some(threshold) => listing.availability_365.is_some_and(|days| days >= threshold),
            None => true
        }
    }

    /// The listings that pass, in dataset order.
    pub fn apply<'a>(&self, listings: &'a [ListingRecord]) -> Vec<&'a ListingRecord> {
        listings.iter().filter(|listing| self.matches(listing)).collect()
    }
}
