use super::{write_cache, write_csv, ExportError};
use crate::pipeline::Pipeline;
use crate::source::CsvSource;
use crate::types::{Document, Value};
use anyhow::Result;
use std::path::Path;

fn listing(fields: &[(&str, Value)]) -> Document {
    fields.iter().map(|(key, value)| (key.to_string(), value.clone())).collect()
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn snapshot() -> Vec<Document> {
    let coordinates = Value::Sequence(vec![Value::infer("-73.99"), Value::infer("40.73")]);
    let amenities = Value::Sequence(vec![text("Wifi"), text("Kitchen")]);

    vec![
        listing(&[("id", text("a1")), ("price", text("$150.00")), ("rating", Value::infer("90")), ("coordinates", coordinates), ("amenities", amenities.clone()), ("availability_365", Value::infer("45"))]),
        listing(&[("id", text("b2")), ("price", Value::Null), ("rating", Value::Null), ("coordinates", text("bad")), ("amenities", amenities), ("availability_365", Value::infer("400"))]),
        listing(&[("id", text("c3")), ("price", Value::infer("75.5")), ("rating", Value::infer("85")), ("coordinates", text("-0.12, 51.5")), ("availability_365", Value::Null)]),
    ]
}

fn to_csv(frame: &crate::models::Frame) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(frame, &mut buffer)?;

    Ok(String::from_utf8(buffer)?)
}

#[test]
fn test_write_csv_emits_header_and_canonical_values() -> Result<()> {
    let dataset = Pipeline::new().clean(snapshot())?;
    let output = to_csv(&dataset.frame)?;
    let mut lines = output.lines();

    assert_eq!(
        lines.next(),
        Some("id,price,rating,coordinates,amenities,availability_365,longitude,latitude,availability_category")
    );
    assert_eq!(
        lines.next(),
        Some(r#"a1,150,90,"[-73.99, 40.73]","[""Wifi"", ""Kitchen""]",45,-73.99,40.73,31-90 Days"#)
    );
    assert_eq!(lines.next(), Some(r#"b2,112.75,87.5,bad,"[""Wifi"", ""Kitchen""]",400,,,"#));
    assert_eq!(lines.next(), Some("c3,75.5,85,\"-0.12, 51.5\",,,-0.12,51.5,"));

    Ok(())
}

#[test]
fn test_cache_round_trip_is_stable_under_a_second_run() -> Result<()> {
    let directory = tempfile::tempdir()?;
    let cache_path = directory.path().join("cleaned_airbnb_data.csv");

    let first = Pipeline::new().clean(snapshot())?;
    write_cache(&first.frame, &cache_path)?;

    let documents = CsvSource::read_documents(std::fs::File::open(&cache_path)?, b',', &cache_path)?;
    let second = Pipeline::new().clean(documents)?;

    assert_eq!(second.report.duplicates_removed, 0);
    assert_eq!(second.report.prices_imputed, 0);
    assert_eq!(second.report.ratings_imputed, 0);
    assert_eq!(second.listings, first.listings);
    assert_eq!(to_csv(&second.frame)?, to_csv(&first.frame)?);

    Ok(())
}

#[test]
fn test_cache_round_trip_keeps_leading_zeros_in_identifiers() -> Result<()> {
    let directory = tempfile::tempdir()?;
    let cache_path = directory.path().join("cleaned_airbnb_data.csv");
    let source = "id,price\n00123,10\n0042,20\n";

    let documents = CsvSource::read_documents(source.as_bytes(), b',', Path::new("listings.csv"))?;
    let first = Pipeline::new().clean(documents)?;
    write_cache(&first.frame, &cache_path)?;

    let documents = CsvSource::read_documents(std::fs::File::open(&cache_path)?, b',', &cache_path)?;
    let second = Pipeline::new().clean(documents)?;
    let ids: Vec<_> = second.listings.iter().map(|listing| listing.id.as_deref()).collect();

    assert_eq!(ids, vec![Some("00123"), Some("0042")]);
    assert_eq!(to_csv(&second.frame)?.lines().nth(1), Some("00123,10"));

    Ok(())
}

#[test]
fn test_write_cache_reports_unwritable_paths() -> Result<()> {
    let dataset = Pipeline::new().clean(snapshot())?;
    let result = write_cache(&dataset.frame, Path::new("/nonexistent-directory/cache.csv"));

    assert!(matches!(result, Err(ExportError::Io { .. })));

    Ok(())
}
