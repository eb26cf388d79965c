mod errors;
mod price;
#[cfg(test)]
mod tests;
mod value;

pub use errors::PriceError;
pub use price::Price;
pub use value::Value;

/// A single source record: field names mapped to values, in source order.
pub type Document = Vec<(String, Value)>;
