use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A single cell of a listing record.
///
/// Source documents are heterogeneous: the same field may hold a scalar in one
/// record and a list or sub-document in another. Every cell is ingested into
/// this tagged union so rows can be compared and hashed as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Decimal),
    Text(String),
    Sequence(Vec<Value>),
    Mapping(Vec<(String, Value)>)
}

impl Value {
    /// Infers a scalar from a flat-file cell.
    pub fn infer(cell: &str) -> Self {
        let cell = cell.trim();

        if cell.is_empty() {
            return Value::Null;
        }

        match cell {
            "true" | "True" | "TRUE" => return Value::Bool(true),
            "false" | "False" | "FALSE" => return Value::Bool(false),
            _ => {}
        }

        match Decimal::from_str(cell) {
            Ok(number) => Value::Number(number),
            Err(_) => Value::Text(cell.to_string())
        }
    }

    /// Null, or text with nothing but whitespace.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(text) => text.trim().is_empty(),
            _ => false
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping"
        }
    }

    /// The canonical flat form of this value. Nested values become their string representation.
    pub fn canonical(&self) -> Value {
        if self.is_nested() {
            Value::Text(self.to_string())
        } else {
            self.clone()
        }
    }

    /// Renders a scalar as a label, `None` for null.
    pub fn as_label(&self) -> Option<String> {
        if self.is_missing() {
            None
        } else {
            Some(self.to_string())
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Number(number) => Some(*number),
            Value::Text(text) => Decimal::from_str(text.trim()).ok(),
            _ => None
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            //NOTE: Going through the decimal text keeps `-73.99` identical to a directly parsed float
            Value::Number(number) => number.normalize().to_string().parse::<f64>().ok().filter(|number| number.is_finite()),
            Value::Text(text) => text.trim().parse::<f64>().ok().filter(|number| number.is_finite()),
            _ => None
        }
    }

    /// Integral numbers only; `12.5` is not an integer.
    pub fn as_i64(&self) -> Option<i64> {
        let number = self.as_decimal()?;

        if number.fract().is_zero() {
            number.to_i64()
        } else {
            None
        }
    }

    fn fmt_nested(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => formatter.write_str("null"),
            Value::Text(text) => write!(formatter, "{text:?}"),
            other => Display::fmt(other, formatter)
        }
    }
}

impl Display for Value {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(flag) => write!(formatter, "{flag}"),
            Value::Number(number) => write!(formatter, "{}", number.normalize()),
            Value::Text(text) => formatter.write_str(text),
            Value::Sequence(items) => {
                formatter.write_str("[")?;

                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }

                    item.fmt_nested(formatter)?;
                }

                formatter.write_str("]")
            }
            Value::Mapping(entries) => {
                formatter.write_str("{")?;

                for (index, (key, item)) in entries.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }

                    write!(formatter, "{key:?}: ")?;
                    item.fmt_nested(formatter)?;
                }

                formatter.write_str("}")
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => number_from_text(&number.to_string()),
            serde_json::Value::String(text) => Value::Text(text),
            serde_json::Value::Array(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(object) => {
                if let Some(scalar) = unwrap_extended_json(&object) {
                    return scalar;
                }

                Value::Mapping(object.into_iter().map(|(key, item)| (key, Value::from(item))).collect())
            }
        }
    }
}

fn number_from_text(text: &str) -> Value {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map(Value::Number)
        .unwrap_or_else(|_| Value::Text(text.to_string()))
}

/// Collapses MongoDB extended JSON wrappers (`{"$numberDecimal": "80.00"}` and friends) into scalars.
fn unwrap_extended_json(object: &serde_json::Map<String, serde_json::Value>) -> Option<Value> {
    if object.len() != 1 {
        return None;
    }

    let (key, inner) = object.iter().next()?;

    match (key.as_str(), inner) {
        ("$numberDecimal" | "$numberDouble" | "$numberInt" | "$numberLong", serde_json::Value::String(text)) => {
            Some(number_from_text(text))
        }
        ("$oid", serde_json::Value::String(text)) => Some(Value::Text(text.clone())),
        ("$date", serde_json::Value::String(text)) => Some(Value::Text(text.clone())),
        ("$date", serde_json::Value::Object(nested)) => {
            let millis = nested.get("$numberLong")?.as_str()?.parse::<i64>().ok()?;
            let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)?;

            Some(Value::Text(timestamp.to_rfc3339()))
        }
        ("$date", serde_json::Value::Number(number)) => {
            let timestamp = DateTime::<Utc>::from_timestamp_millis(number.as_i64()?)?;

            Some(Value::Text(timestamp.to_rfc3339()))
        }
        _ => None
    }
}
