use crate::models::{AvailabilityCategory, Coordinates, Field, Frame, RowMalformation};
use crate::pipeline::{ColumnMap, PipelineError};
use crate::types::{Document, Price, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;
use tracing::warn;

pub const LONGITUDE_COLUMN: &str = "longitude";
pub const LATITUDE_COLUMN: &str = "latitude";
pub const DURATION_COLUMN: &str = "availability_duration";
pub const CATEGORY_COLUMN: &str = "availability_category";

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A statistic written into every missing cell of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Imputation {
    pub statistic: Decimal,
    pub filled: usize
}

/// Per-row values of a derived column, plus the rows that could not be derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation<T> {
    pub values: Vec<Option<T>>,
    pub malformations: Vec<RowMalformation>
}

impl<T> Default for Derivation<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            malformations: Vec::new()
        }
    }
}

impl<T> Derivation<T> {
    fn push(&mut self, value: Option<T>) {
        self.values.push(value);
    }

    fn reject(&mut self, malformation: RowMalformation) {
        warn!("{malformation}");
        self.malformations.push(malformation);
        self.values.push(None);
    }
}

/// Expands sub-documents into dotted columns (`address.suburb`). Sequences and empty mappings stay whole.
pub fn expand_document(document: Document) -> Document {
    let mut expanded = Vec::with_capacity(document.len());

    for (key, value) in document {
        expand_into(key, value, &mut expanded);
    }

    expanded
}

fn expand_into(key: String, value: Value, expanded: &mut Document) {
    match value {
        Value::Mapping(entries) if !entries.is_empty() => {
            for (child, item) in entries {
                expand_into(format!("{key}.{child}"), item, expanded);
            }
        }
        other => expanded.push((key, other))
    }
}

/// Replaces nested values with their canonical string in every column that holds one in any row.
/// Returns the names of the affected columns.
pub fn flatten(frame: &mut Frame) -> Vec<String> {
    let nested_columns: Vec<usize> = (0..frame.columns().len())
        .filter(|column| frame.rows().iter().any(|row| row[*column].is_nested()))
        .collect();

    for row in frame.rows_mut().iter_mut() {
        for column in &nested_columns {
            if row[*column].is_nested() {
                row[*column] = row[*column].canonical();
            }
        }
    }

    nested_columns.iter()
        .map(|column| frame.columns()[*column].clone())
        .collect()
}

/// Drops rows equal to an earlier row in every column. Returns how many were dropped.
pub fn deduplicate(frame: &mut Frame) -> usize {
    let before = frame.len();
    let mut seen = HashSet::with_capacity(before);

    frame.rows_mut().retain(|row| seen.insert(row.clone()));

    before - frame.len()
}

/// Median of non-negative values. Sorts `values` in place.
pub fn median(values: &mut [Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }

    values.sort_unstable();
    let middle = values.len() / 2;

    if values.len() % 2 == 0 {
        let (lower, upper) = (values[middle - 1], values[middle]);
        //NOTE: Halving the gap keeps two prices near Decimal::MAX from overflowing
        Some(lower + (upper - lower) / Decimal::from(2))
    } else {
        Some(values[middle])
    }
}

/// Arithmetic mean. `None` when `values` is empty or the mean cannot be represented.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }

    if let Some(total) = values.iter().try_fold(Decimal::ZERO, |total, value| total.checked_add(*value)) {
        return Some(total / Decimal::from(values.len() as u64));
    }

    //NOTE: Each partial mean stays between the smallest and largest value
    values.iter().enumerate().try_fold(Decimal::ZERO, |mean, (index, value)| {
        let step = value.checked_sub(mean)? / Decimal::from(index as u64 + 1);
        mean.checked_add(step)
    })
}

/// Fills missing prices with the median of the parseable ones.
/// A column without a single parseable price cannot be cleaned at all.
pub fn impute_price(frame: &mut Frame, column: usize) -> Result<Imputation, PipelineError> {
    let mut present: Vec<Decimal> = frame.rows().iter()
        .filter_map(|row| Price::from_value(&row[column]).ok())
        .map(|price| price.value())
        .collect();

    let statistic = median(&mut present)
        .ok_or_else(|| PipelineError::unusable_column(&frame.columns()[column], "no row holds a parseable price"))?;
    let filled = fill_missing(frame, column, statistic);

    Ok(Imputation { statistic, filled })
}

/// Fills missing ratings with the mean of the numeric ones. `None` when there is nothing to average.
pub fn impute_rating(frame: &mut Frame, column: usize) -> Result<Option<Imputation>, PipelineError> {
    let present: Vec<Decimal> = frame.rows().iter()
        .filter_map(|row| row[column].as_decimal())
        .collect();

    if present.is_empty() {
        return Ok(None);
    }

    let statistic = mean(&present)
        .ok_or_else(|| PipelineError::unusable_column(&frame.columns()[column], "mean rating exceeds the representable range"))?;
    let filled = fill_missing(frame, column, statistic);

    Ok(Some(Imputation { statistic, filled }))
}

fn fill_missing(frame: &mut Frame, column: usize, statistic: Decimal) -> usize {
    let mut filled = 0;

    for row in frame.rows_mut().iter_mut() {
        if row[column].is_missing() {
            row[column] = Value::Number(statistic);
            filled += 1;
        }
    }

    filled
}

/// Parses every price into a number. Rows whose price cannot be parsed are removed.
pub fn coerce_prices(frame: &mut Frame, column: usize, id_column: Option<usize>) -> Vec<RowMalformation> {
    let column_name = frame.columns()[column].clone();
    let mut malformations = Vec::new();
    let mut prices = Vec::with_capacity(frame.len());

    for row in 0..frame.len() {
        match Price::from_value(frame.value(row, column)) {
            Ok(price) => prices.push(Some(price)),
            Err(error) => {
                let record = record_label(frame, row, id_column);
                let malformation = RowMalformation::price(row, &record, &column_name, frame.value(row, column));

                warn!("{malformation}: {error}");
                malformations.push(malformation);
                prices.push(None);
            }
        }
    }

    let mut prices = prices.into_iter();

    frame.rows_mut().retain_mut(|row| match prices.next().flatten() {
        Some(price) => {
            row[column] = Value::from(price);
            true
        }
        None => false
    });

    malformations
}

/// Derives coordinates for every row.
///
/// Separate longitude/latitude columns are read as they are. A combined column
/// is parsed with [`Coordinates::parse`] and split into new `longitude` and
/// `latitude` columns. `None` when the frame has no coordinate data.
pub fn derive_coordinates(frame: &mut Frame, columns: &ColumnMap) -> Option<Derivation<Coordinates>> {
    let id_column = columns.get(Field::Id);

    if let (Some(longitude), Some(latitude)) = (columns.get(Field::Longitude), columns.get(Field::Latitude)) {
        return Some(read_coordinate_columns(frame, longitude, latitude, id_column));
    }

    let column = columns.get(Field::Coordinates)?;
    let column_name = frame.columns()[column].clone();
    let mut derivation = Derivation::default();

    for row in 0..frame.len() {
        let value = frame.value(row, column);

        match Coordinates::parse(value) {
            Some(coordinates) => derivation.push(Some(coordinates)),
            None if value.is_missing() => derivation.push(None),
            None => {
                let record = record_label(frame, row, id_column);
                derivation.reject(RowMalformation::coordinates(row, &record, &column_name, value));
            }
        }
    }

    let longitudes = derivation.values.iter()
        .map(|coordinates| coordinates.map_or(Value::Null, |coordinates| float_value(coordinates.longitude)))
        .collect();
    let latitudes = derivation.values.iter()
        .map(|coordinates| coordinates.map_or(Value::Null, |coordinates| float_value(coordinates.latitude)))
        .collect();

    frame.set_column(LONGITUDE_COLUMN, longitudes);
    frame.set_column(LATITUDE_COLUMN, latitudes);

    Some(derivation)
}

/// Pairs separate longitude and latitude cells. A row missing either cell has no
/// coordinates; a present cell that is not a number is a malformation.
fn read_coordinate_columns(frame: &Frame, longitude: usize, latitude: usize, id_column: Option<usize>) -> Derivation<Coordinates> {
    let mut derivation = Derivation::default();

    for row in 0..frame.len() {
        let cells = [(longitude, frame.value(row, longitude)), (latitude, frame.value(row, latitude))];
        let unreadable = cells.iter()
            .find(|(_, value)| !value.is_missing() && value.as_f64().is_none());

        if let Some((column, value)) = unreadable {
            let record = record_label(frame, row, id_column);
            derivation.reject(RowMalformation::coordinates(row, &record, &frame.columns()[*column], value));
            continue;
        }

        derivation.push(cells[0].1.as_f64().zip(cells[1].1.as_f64())
            .map(|(longitude, latitude)| Coordinates::new(longitude, latitude)));
    }

    derivation
}

/// Whole days between the availability start and end timestamps, as a new `availability_duration` column.
/// `None` unless both timestamp columns exist.
pub fn derive_availability_duration(frame: &mut Frame, columns: &ColumnMap) -> Option<Derivation<i64>> {
    let start = columns.get(Field::AvailabilityStart)?;
    let end = columns.get(Field::AvailabilityEnd)?;
    let id_column = columns.get(Field::Id);
    let mut derivation = Derivation::default();

    for row in 0..frame.len() {
        let mut rejected = false;
        let mut bounds = [None, None];

        for (slot, column) in [start, end].into_iter().enumerate() {
            let value = frame.value(row, column);

            if value.is_missing() {
                continue;
            }

            match parse_timestamp(value) {
                Some(timestamp) => bounds[slot] = Some(timestamp),
                None => {
                    let record = record_label(frame, row, id_column);
                    let malformation = RowMalformation::timestamp(row, &record, &frame.columns()[column], value);

                    warn!("{malformation}");
                    derivation.malformations.push(malformation);
                    rejected = true;
                }
            }
        }

        match bounds {
            [Some(started), Some(ended)] if !rejected => derivation.push(Some((ended - started).num_days())),
            _ => derivation.push(None)
        }
    }

    let durations = derivation.values.iter()
        .map(|days| days.map_or(Value::Null, |days| Value::Number(Decimal::from(days))))
        .collect();

    frame.set_column(DURATION_COLUMN, durations);

    Some(derivation)
}

/// Buckets `availability_365` into an `availability_category` column. `None` when the column is absent.
pub fn derive_availability_category(frame: &mut Frame, columns: &ColumnMap) -> Option<Derivation<AvailabilityCategory>> {
    let column = columns.get(Field::Availability365)?;
    let column_name = frame.columns()[column].clone();
    let id_column = columns.get(Field::Id);
    let mut derivation = Derivation::default();

    for row in 0..frame.len() {
        let value = frame.value(row, column);

        if value.is_missing() {
            derivation.push(None);
            continue;
        }

        match value.as_i64().and_then(AvailabilityCategory::bucket) {
            Some(category) => derivation.push(Some(category)),
            None => {
                let record = record_label(frame, row, id_column);
                derivation.reject(RowMalformation::availability(row, &record, &column_name, value));
            }
        }
    }

    let categories = derivation.values.iter()
        .map(|category| category.map_or(Value::Null, |category| Value::Text(category.label().to_string())))
        .collect();

    frame.set_column(CATEGORY_COLUMN, categories);

    Some(derivation)
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and bare `YYYY-MM-DD` dates.
pub fn parse_timestamp(value: &Value) -> Option<NaiveDateTime> {
    let Value::Text(text) = value else {
        return None;
    };

    let text = text.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.naive_utc());
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, format) {
            return Some(timestamp);
        }
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()?.and_hms_opt(0, 0, 0)
}

/// Identifies a row in logs: its id when it has one, its position otherwise.
pub fn record_label(frame: &Frame, row: usize, id_column: Option<usize>) -> String {
    id_column
        .and_then(|column| frame.value(row, column).as_label())
        .unwrap_or_else(|| format!("#{row}"))
}

fn float_value(number: f64) -> Value {
    let text = number.to_string();

    Decimal::from_str(&text)
        .map(Value::Number)
        .unwrap_or(Value::Text(text))
}
