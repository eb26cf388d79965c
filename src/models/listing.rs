use crate::models::AvailabilityCategory;
use crate::types::{Price, Value};
use rust_decimal::Decimal;
use serde::Serialize;

/// Longitude/latitude pair of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64
}

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    /// Reads a combined coordinate cell.
    ///
    /// A two-element numeric sequence is taken directly. Text of the form
    /// `"<lon>, <lat>"`, optionally wrapped in brackets or parentheses, is split on
    /// commas. Anything else (wrong element count, non-numeric parts) is `None`.
    pub fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::Sequence(items) => match items.as_slice() {
                [longitude, latitude] => Some(Coordinates::new(longitude.as_f64()?, latitude.as_f64()?)),
                _ => None
            },
            Value::Text(text) => Coordinates::parse_text(text),
            _ => None
        }
    }

    pub fn parse_text(text: &str) -> Option<Self> {
        let text = text.trim();
        let inner = text.strip_prefix('[').and_then(|rest| rest.strip_suffix(']'))
            .or_else(|| text.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')))
            .unwrap_or(text);

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();

        let [longitude, latitude] = parts.as_slice() else {
            return None;
        };

        let longitude = longitude.parse::<f64>().ok().filter(|number| number.is_finite())?;
        let latitude = latitude.parse::<f64>().ok().filter(|number| number.is_finite())?;

        Some(Coordinates::new(longitude, latitude))
    }
}

/// One cleaned listing, projected from a row of the cleaned frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Price,
    pub rating: Option<Decimal>,
    pub neighbourhood: Option<String>,
    pub room_type: Option<String>,
    pub property_type: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub availability_365: Option<i64>,
    pub availability_category: Option<AvailabilityCategory>,
    pub availability_duration_days: Option<i64>,
    pub reviews_per_month: Option<Decimal>
}
