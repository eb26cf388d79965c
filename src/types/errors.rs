use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    #[error("Price error: value is an empty string")]
    Empty,
    #[error("Price error: {0}")]
    InvalidFormat(String),
    #[error("Price error: negative value [{0}]")]
    Negative(String),
    #[error("Price error: value of kind [{0}] is not a price")]
    NotScalar(&'static str)
}
