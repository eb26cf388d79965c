use super::{AvailabilityCategory, Coordinates, Frame, RowMalformation};
use crate::types::Value;
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

#[test]
fn test_coordinates_parse_comma_separated_text() {
    assert_eq!(Coordinates::parse(&text("40.73, -73.99")), Some(Coordinates::new(40.73, -73.99)));
    assert_eq!(Coordinates::parse(&text("  -73.99,40.73 ")), Some(Coordinates::new(-73.99, 40.73)));
    assert_eq!(Coordinates::parse(&text("[-73.99, 40.73]")), Some(Coordinates::new(-73.99, 40.73)));
    assert_eq!(Coordinates::parse(&text("(-73.99, 40.73)")), Some(Coordinates::new(-73.99, 40.73)));
}

#[test]
fn test_coordinates_parse_malformed_text_as_none() {
    assert_eq!(Coordinates::parse(&text("bad")), None);
    assert_eq!(Coordinates::parse(&text("1,2,3")), None);
    assert_eq!(Coordinates::parse(&text("40.73,")), None);
    assert_eq!(Coordinates::parse(&text("north, south")), None);
    assert_eq!(Coordinates::parse(&text("inf, 2")), None);
    assert_eq!(Coordinates::parse(&Value::Null), None);
}

#[test]
fn test_coordinates_split_two_element_sequences_directly() {
    let pair = Value::Sequence(vec![Value::Number(Decimal::from(-74)), Value::Text("41".to_string())]);
    let triple = Value::Sequence(vec![Value::Number(Decimal::ONE); 3]);

    assert_eq!(Coordinates::parse(&pair), Some(Coordinates::new(-74.0, 41.0)));
    assert_eq!(Coordinates::parse(&triple), None);
}

#[test]
fn test_availability_buckets_are_right_open() {
    let test_cases = vec![
        (0, Some(AvailabilityCategory::UpToMonth)),
        (29, Some(AvailabilityCategory::UpToMonth)),
        (30, Some(AvailabilityCategory::UpToQuarter)),
        (45, Some(AvailabilityCategory::UpToQuarter)),
        (90, Some(AvailabilityCategory::UpToHalfYear)),
        (179, Some(AvailabilityCategory::UpToHalfYear)),
        (180, Some(AvailabilityCategory::UpToYear)),
        (365, Some(AvailabilityCategory::UpToYear)),
        (366, None),
        (400, None),
        (-1, None),
    ];

    for (days, expected) in test_cases {
        assert_eq!(AvailabilityCategory::bucket(days), expected, "bucket for {days}");
    }
}

#[test]
fn test_availability_labels() {
    let labels: Vec<&str> = AvailabilityCategory::ALL.iter().map(|category| category.label()).collect();

    assert_eq!(labels, vec!["0-30 Days", "31-90 Days", "91-180 Days", "181-365 Days"]);
    assert_eq!(AvailabilityCategory::UpToQuarter.to_string(), "31-90 Days");
}

#[test]
fn test_frame_aligns_heterogeneous_documents() -> Result<()> {
    let frame = Frame::from_documents(vec![
        vec![("id".to_string(), text("a")), ("price".to_string(), text("10"))],
        vec![("price".to_string(), text("20")), ("rating".to_string(), text("4.5"))],
    ]);

    assert_eq!(frame.columns(), &["id".to_string(), "price".to_string(), "rating".to_string()]);
    assert_eq!(frame.len(), 2);
    assert_eq!(frame.value(0, 2), &Value::Null);
    assert_eq!(frame.value(1, 0), &Value::Null);
    assert_eq!(frame.value(1, 1), &text("20"));
    assert_eq!(frame.value(7, 7), &Value::Null);

    let rating = frame.column_index("rating").ok_or_else(|| anyhow!("rating column missing"))?;

    assert_eq!(frame.value(1, rating), &text("4.5"));

    Ok(())
}

#[test]
fn test_frame_set_column_appends_or_replaces() -> Result<()> {
    let mut frame = Frame::from_documents(vec![
        vec![("id".to_string(), text("a"))],
        vec![("id".to_string(), text("b"))],
    ]);

    let appended = frame.set_column("latitude", vec![text("1")]);

    assert_eq!(appended, 1);
    assert_eq!(frame.rows()[0], vec![text("a"), text("1")]);
    assert_eq!(frame.rows()[1], vec![text("b"), Value::Null]);

    let replaced = frame.set_column("id", vec![text("x"), text("y")]);

    assert_eq!(replaced, 0);
    assert_eq!(frame.value(1, 0), &text("y"));
    assert_eq!(frame.columns().len(), 2);

    Ok(())
}

#[test]
fn test_row_malformation_reports_context() {
    let malformation = RowMalformation::coordinates(3, "listing-9", "location.coordinates", &text("bad"));

    assert!(matches!(malformation, RowMalformation::Coordinates { row: 3, .. }));
    assert!(!malformation.drops_row());
    assert_eq!(
        malformation.to_string(),
        "Row [3]:[listing-9] has malformed coordinates [bad] in column [location.coordinates]"
    );
    assert!(RowMalformation::price(0, "x", "price", &text("free")).drops_row());
}
