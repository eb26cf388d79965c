use super::{Price, PriceError, Value};
use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_price_successfully_parses_valid_strings() -> Result<()> {
    let test_cases = vec![
        ("150", "150.00"),
        ("80.5", "80.50"),
        ("  99.99  ", "99.99"),
        ("$1,250.00", "1250.00"),
        ("$45", "45.00"),
        ("0", "0.00"),
        ("-0", "0.00"),
    ];

    for (input_string, expected_output) in test_cases {
        assert_eq!(Price::from_str(input_string)?.to_string(), expected_output);
    }

    Ok(())
}

#[test]
fn test_price_fails_to_parse_invalid_strings() {
    assert_eq!(Price::from_str(""), Err(PriceError::Empty));
    assert_eq!(Price::from_str("   "), Err(PriceError::Empty));
    assert!(matches!(Price::from_str("-10"), Err(PriceError::Negative(_))));
    assert!(matches!(Price::from_str("abc"), Err(PriceError::InvalidFormat(_))));
    assert!(matches!(Price::from_str("$"), Err(PriceError::InvalidFormat(_))));
    assert!(matches!(Price::from_str("1.2.3"), Err(PriceError::InvalidFormat(_))));
}

#[test]
fn test_price_from_value_accepts_numbers_and_text_only() -> Result<()> {
    assert_eq!(Price::from_value(&Value::Number(Decimal::new(8000, 2)))?.to_string(), "80.00");
    assert_eq!(Price::from_value(&Value::Text("$12".to_string()))?.to_string(), "12.00");
    assert_eq!(Price::from_value(&Value::Null), Err(PriceError::NotScalar("null")));
    assert_eq!(Price::from_value(&Value::Sequence(vec![])), Err(PriceError::NotScalar("sequence")));

    Ok(())
}

#[test]
fn test_price_supports_summation() -> Result<()> {
    let prices = vec![Price::from_str("10.25")?, Price::from_str("4.75")?, Price::from_str("5")?];
    let total = Price::checked_sum(prices.iter().copied());

    assert_eq!(total.map(|total| total.to_string()), Some("20.00".to_string()));
    assert_eq!(Price::checked_sum(Vec::new()), Some(Price::ZERO));

    Ok(())
}

#[test]
fn test_price_addition_reports_overflow_instead_of_panicking() -> Result<()> {
    let largest = Price::new(Decimal::MAX)?;
    let half = Price::from_str("50000000000000000000000000000")?;

    assert_eq!(largest.checked_add(Price::ZERO), Some(largest));
    assert_eq!(largest.checked_add(Price::from_str("1")?), None);
    assert_eq!(Price::checked_sum([half, half, half]), None);

    Ok(())
}

#[test]
fn test_value_infers_scalars_from_cells() -> Result<()> {
    assert_eq!(Value::infer(""), Value::Null);
    assert_eq!(Value::infer("   "), Value::Null);
    assert_eq!(Value::infer("True"), Value::Bool(true));
    assert_eq!(Value::infer("false"), Value::Bool(false));
    assert_eq!(Value::infer("42"), Value::Number(Decimal::from(42)));
    assert_eq!(Value::infer(" -73.99 "), Value::Number(Decimal::from_str("-73.99")?));
    assert_eq!(Value::infer("Entire home/apt"), Value::Text("Entire home/apt".to_string()));

    Ok(())
}

#[test]
fn test_value_numbers_compare_by_magnitude() -> Result<()> {
    assert_eq!(Value::infer("80"), Value::infer("80.00"));
    assert_ne!(Value::infer("80"), Value::Text("80".to_string()));

    Ok(())
}

#[test]
fn test_value_canonical_form_of_nested_values() -> Result<()> {
    let sequence = Value::Sequence(vec![
        Value::Number(Decimal::from_str("-73.99")?),
        Value::Number(Decimal::from_str("40.730")?),
    ]);
    let mapping = Value::Mapping(vec![
        ("host_name".to_string(), Value::Text("Ana".to_string())),
        ("superhost".to_string(), Value::Bool(true)),
        ("about".to_string(), Value::Null),
        ("tags".to_string(), Value::Sequence(vec![Value::Text("wifi".to_string())])),
    ]);

    assert_eq!(sequence.canonical(), Value::Text("[-73.99, 40.73]".to_string()));
    assert_eq!(
        mapping.canonical(),
        Value::Text(r#"{"host_name": "Ana", "superhost": true, "about": null, "tags": ["wifi"]}"#.to_string())
    );
    assert_eq!(Value::Bool(true).canonical(), Value::Bool(true));

    Ok(())
}

#[test]
fn test_value_numeric_accessors() -> Result<()> {
    assert_eq!(Value::infer("45").as_i64(), Some(45));
    assert_eq!(Value::infer("45.5").as_i64(), None);
    assert_eq!(Value::Text("12".to_string()).as_i64(), Some(12));
    assert_eq!(Value::Text("soon".to_string()).as_i64(), None);
    assert_eq!(Value::Text("40.73".to_string()).as_f64(), Some(40.73));
    assert_eq!(Value::Number(Decimal::from(-74)).as_f64(), Some(-74.0));
    assert_eq!(Value::Text(" ".to_string()).as_label(), None);
    assert_eq!(Value::Number(Decimal::from(7)).as_label(), Some("7".to_string()));

    Ok(())
}

#[test]
fn test_value_unwraps_extended_json_scalars() -> Result<()> {
    let json: serde_json::Value = serde_json::from_str(
        r#"{
            "price": {"$numberDecimal": "80.00"},
            "beds": {"$numberInt": "2"},
            "_id": {"$oid": "5f1a"},
            "last_scraped": {"$date": {"$numberLong": "0"}},
            "first_review": {"$date": "2019-02-11T05:00:00Z"},
            "score": 1.5e2
        }"#,
    )?;

    let Value::Mapping(entries) = Value::from(json) else {
        anyhow::bail!("expected a mapping");
    };

    let lookup = |key: &str| entries.iter().find(|(name, _)| name == key).map(|(_, value)| value.clone());

    assert_eq!(lookup("price"), Some(Value::Number(Decimal::from(80))));
    assert_eq!(lookup("beds"), Some(Value::Number(Decimal::from(2))));
    assert_eq!(lookup("_id"), Some(Value::Text("5f1a".to_string())));
    assert_eq!(lookup("last_scraped"), Some(Value::Text("1970-01-01T00:00:00+00:00".to_string())));
    assert_eq!(lookup("first_review"), Some(Value::Text("2019-02-11T05:00:00Z".to_string())));
    assert_eq!(lookup("score"), Some(Value::Number(Decimal::from(150))));

    Ok(())
}
