//! CSV ingest and field parsing.
//!
//! Every field is parsed explicitly against the fixed schema. A bad field
//! fails the whole load; a partially loaded table is never returned.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use super::dataset::{Dataset, NumericColumn, Record, DATE_FORMAT};
use super::error::{DataError, ValidationError};

/// Date-only layouts accepted in CSV files, tried in order.
const DATE_LAYOUTS: [&str; 4] = [DATE_FORMAT, "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Date-time layouts accepted in CSV files; the time part is dropped.
const DATETIME_LAYOUTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Load a dataset from a CSV file on disk.
pub fn load_csv(path: &Path) -> Result<Dataset, DataError> {
    let file = File::open(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = read_csv(file)?;
    debug!(path = %path.display(), rows = dataset.len(), "CSV parsed");
    Ok(dataset)
}

/// Parse a dataset from any CSV source with a header row.
pub fn read_csv<R: Read>(source: R) -> Result<Dataset, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // records() starts after the header; CSV lines are 1-based
        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(idx + 2);
        rows.push(columns.parse_record(&record, line)?);
    }

    Ok(Dataset::from_rows(rows))
}

/// Normalize a CSV date cell, accepting a few common layouts.
pub fn normalize_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
        .or_else(|| {
            DATETIME_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Parse a date typed into the form. Only `YYYY-MM-DD` is accepted.
pub fn parse_entry_date(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(text.to_string()))
}

/// Parse a number typed into the form.
pub fn parse_entry_value(column: NumericColumn, text: &str) -> Result<f64, ValidationError> {
    parse_finite(text).ok_or_else(|| ValidationError::InvalidNumber {
        column: column.name(),
        value: text.to_string(),
    })
}

/// Parse a finite number; "NaN" and "inf" are rejected.
fn parse_finite(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Positions of the required columns within a header row.
struct ColumnIndex {
    date: usize,
    value1: usize,
    value2: usize,
    category: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, DataError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|header| normalize_header_name(header) == name)
                .ok_or(DataError::MissingColumn(name))
        };

        Ok(Self {
            date: find("Date")?,
            value1: find("Value1")?,
            value2: find("Value2")?,
            category: find("Category")?,
        })
    }

    fn parse_record(&self, record: &StringRecord, line: usize) -> Result<Record, DataError> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let date_text = field(self.date);
        let date = normalize_date(date_text).ok_or_else(|| DataError::InvalidField {
            line,
            column: "Date",
            value: date_text.to_string(),
        })?;

        let number = |idx: usize, column: NumericColumn| {
            let text = field(idx);
            parse_finite(text).ok_or_else(|| DataError::InvalidField {
                line,
                column: column.name(),
                value: text.to_string(),
            })
        };

        Ok(Record {
            date,
            value1: number(self.value1, NumericColumn::Value1)?,
            value2: number(self.value2, NumericColumn::Value2)?,
            category: field(self.category).to_string(),
        })
    }
}

fn normalize_header_name(name: &str) -> &str {
    // Spreadsheet exports often start with a UTF-8 BOM
    name.trim().trim_start_matches('\u{feff}')
}
