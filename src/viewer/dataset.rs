//! The in-memory table behind the viewer.
//!
//! The schema is fixed: `Date`, `Value1`, `Value2`, `Category`. Rows are only
//! ever appended; nothing is written back to disk.

use chrono::NaiveDate;

/// Column names, in table order.
pub const COLUMNS: [&str; 4] = ["Date", "Value1", "Value2", "Category"];

/// Category given to rows added through the form.
pub const MANUAL_ENTRY: &str = "Manual entry";

/// Canonical text form of a date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One numeric column of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    Value1,
    Value2,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 2] = [NumericColumn::Value1, NumericColumn::Value2];

    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::Value1 => "Value1",
            NumericColumn::Value2 => "Value2",
        }
    }
}

/// A single row
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub value1: f64,
    pub value2: f64,
    pub category: String,
}

impl Record {
    /// Build a row entered by hand.
    pub fn manual(date: NaiveDate, value1: f64, value2: f64) -> Self {
        Self {
            date,
            value1,
            value2,
            category: MANUAL_ENTRY.to_string(),
        }
    }

    /// `Date` in `YYYY-MM-DD` form.
    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn value(&self, column: NumericColumn) -> f64 {
        match column {
            NumericColumn::Value1 => self.value1,
            NumericColumn::Value2 => self.value2,
        }
    }
}

/// Ordered, append-only table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Record>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        COLUMNS.len()
    }

    /// Values of one numeric column in row order.
    pub fn values(&self, column: NumericColumn) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row.value(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_manual_record() {
        let record = Record::manual(date(2023, 4, 10), 5.0, 6.0);
        assert_eq!(record.category, MANUAL_ENTRY);
        assert_eq!(record.date_text(), "2023-04-10");
        assert_eq!(record.value(NumericColumn::Value2), 6.0);
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut dataset = Dataset::default();
        assert!(dataset.is_empty());

        dataset.push(Record::manual(date(2023, 4, 2), 3.0, 4.0));
        dataset.push(Record::manual(date(2023, 4, 1), 1.0, 2.0));

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.column_count(), 4);
        let v1: Vec<f64> = dataset.values(NumericColumn::Value1).collect();
        assert_eq!(v1, vec![3.0, 1.0]);
    }
}
