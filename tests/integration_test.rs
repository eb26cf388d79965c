use std::path::Path;
use std::process::{Command, Output};

use anyhow::Result;
use serde_json::Value;

fn run_dashboard(args: &[&str]) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_listing-dashboard");

    Ok(Command::new(binary_path)
        .args(args)
        .env_remove("LISTINGS_CONNECTION_URI")
        .output()?)
}

fn report(output: &Output) -> Result<Value> {
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_cli_cleans_the_csv_sample() -> Result<()> {
    let sample_path = Path::new("samples").join("listings.csv");
    let output = run_dashboard(&["--source-path", &sample_path.to_string_lossy(), "--no-cache"])?;

    assert!(output.status.success());

    let report = report(&output)?;
    let summary = &report["summary"];
    let views = &report["views"];

    assert_eq!(report["status"], "ok");
    assert_eq!(summary["documents_read"], 7);
    assert_eq!(summary["duplicates_removed"], 1);
    assert_eq!(summary["prices_imputed"], 1);
    assert_eq!(summary["ratings_imputed"], 1);
    assert_eq!(summary["rows_dropped"], 1);
    assert_eq!(summary["listings"], 5);
    assert_eq!(summary["malformations"].as_array().map(Vec::len), Some(4));

    assert_eq!(views["listing_count"], 5);
    assert_eq!(views["price_total"], "1590.00");
    assert_eq!(views["price_histogram"].as_array().map(Vec::len), Some(30));
    assert_eq!(views["top_reviewed"][0]["id"], "5");
    assert_eq!(views["count_by_room_type"][0]["key"], "Entire home/apt");
    assert_eq!(views["count_by_room_type"][0]["count"], 3);
    assert_eq!(views["map"]["points"].as_array().map(Vec::len), Some(4));

    Ok(())
}

#[test]
fn test_cli_applies_filters() -> Result<()> {
    let output = run_dashboard(&[
        "--source-path", "samples/listings.csv",
        "--no-cache",
        "--neighbourhood", "Harlem",
        "--neighbourhood", "Soho",
        "--max-price", "200"
    ])?;

    assert!(output.status.success());

    let report = report(&output)?;

    assert_eq!(report["status"], "ok");
    assert_eq!(report["views"]["listing_count"], 3);
    assert_eq!(report["filters"]["neighbourhoods"].as_array().map(Vec::len), Some(2));

    Ok(())
}

#[test]
fn test_cli_reports_empty_filter_results_as_no_data() -> Result<()> {
    let output = run_dashboard(&["--source-path", "samples/listings.csv", "--no-cache", "--neighbourhood", "Atlantis"])?;

    assert!(output.status.success());

    let report = report(&output)?;

    assert_eq!(report["status"], "no_data");
    assert_eq!(report["views"]["listing_count"], 0);
    assert_eq!(report["views"]["price_by_room_type"], Value::Array(Vec::new()));

    Ok(())
}

#[test]
fn test_cli_reads_mongo_export_dumps() -> Result<()> {
    let output = run_dashboard(&["--source-kind", "mongo", "--source-path", "samples/listings.jsonl", "--no-cache"])?;

    assert!(output.status.success());

    let report = report(&output)?;
    let views = &report["views"];
    let neighbourhoods: Vec<&str> = views["price_by_neighbourhood"].as_array()
        .map(|groups| groups.iter().filter_map(|group| group["key"].as_str()).collect())
        .unwrap_or_default();

    assert_eq!(report["summary"]["duplicates_removed"], 1);
    assert_eq!(views["listing_count"], 3);
    assert_eq!(neighbourhoods, vec!["Leblon", "Oahu", "Ribeira"]);
    assert!(views["top_reviewed"]["error"].is_string());
    assert_eq!(views["count_by_availability"][3]["count"], 2);

    Ok(())
}

#[test]
fn test_cli_writes_the_cache() -> Result<()> {
    let directory = tempfile::tempdir()?;
    let cache_path = directory.path().join("cleaned.csv");
    let output = run_dashboard(&["--source-path", "samples/listings.csv", "--cache-path", &cache_path.to_string_lossy()])?;

    assert!(output.status.success());

    let cache = std::fs::read_to_string(&cache_path)?;

    assert!(cache.starts_with("id,name,price,rating"));
    assert_eq!(cache.lines().count(), 6);

    Ok(())
}

#[test]
fn test_cli_fails_on_unreadable_source() -> Result<()> {
    let output = run_dashboard(&["--source-path", "samples/missing.csv", "--no-cache"])?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)?.contains("missing.csv"));

    Ok(())
}
