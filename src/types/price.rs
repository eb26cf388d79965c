use crate::types::errors::PriceError;
use crate::types::Value;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DECIMAL_PLACES: u32 = 2;

/// A non-negative nightly price.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, PriceError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PriceError::Negative(value.to_string()));
        }

        Ok(Price(value.normalize()))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn checked_add(self, rhs: Price) -> Option<Price> {
        self.0.checked_add(rhs.0).map(Price)
    }

    /// Total of all prices. `None` when the total does not fit in a [`Decimal`].
    pub fn checked_sum<I>(prices: I) -> Option<Price>
    where
        I: IntoIterator<Item = Price>
    {
        prices.into_iter().try_fold(Price::ZERO, Price::checked_add)
    }

    /// Interprets a cell as a price. Numbers are taken as-is, text goes through [`Price::from_str`].
    pub fn from_value(value: &Value) -> Result<Self, PriceError> {
        match value {
            Value::Number(number) => Price::new(*number),
            Value::Text(text) => Price::from_str(text),
            other => Err(PriceError::NotScalar(other.kind()))
        }
    }
}

impl Display for Price {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.*}", DECIMAL_PLACES as usize, self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(PriceError::Empty);
        }

        let (is_negative, unsigned) = match value.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, value)
        };

        //NOTE: Scraped listings carry prices like "$1,250.00"
        let digits: String = unsigned.strip_prefix('$').unwrap_or(unsigned)
            .chars()
            .filter(|character| *character != ',')
            .collect();

        if digits.is_empty() {
            return Err(PriceError::InvalidFormat(format!("Value [{value}] has no digits")));
        }

        let amount = Decimal::from_str(&digits).map_err(|error| {
            PriceError::InvalidFormat(format!("Value [{value}] is not a decimal: {error}"))
        })?;

        if is_negative && !amount.is_zero() {
            return Err(PriceError::Negative(value.to_string()));
        }

        Price::new(amount)
    }
}

impl From<Price> for Value {
    fn from(price: Price) -> Self {
        Value::Number(price.0)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
