mod availability;
mod errors;
mod field;
mod frame;
mod listing;
#[cfg(test)]
mod tests;

pub use availability::{AvailabilityCategory, AVAILABILITY_HORIZON_DAYS};
pub use errors::RowMalformation;
pub use field::Field;
pub use frame::Frame;
pub use listing::{Coordinates, ListingRecord};
