//! Summary statistics for the stats panel.

use std::fmt;

use super::dataset::{Dataset, NumericColumn};

/// Min, max and mean of one numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: &'static str,
    /// `None` when the table has no rows
    pub extent: Option<Extent>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Everything shown in the stats panel
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub rows: usize,
    pub columns: usize,
    pub numeric: Vec<ColumnSummary>,
}

impl Summary {
    pub fn of(dataset: &Dataset) -> Self {
        let numeric = NumericColumn::ALL
            .iter()
            .map(|&column| ColumnSummary {
                column: column.name(),
                extent: extent(dataset.values(column)),
            })
            .collect();

        Self {
            rows: dataset.len(),
            columns: dataset.column_count(),
            numeric,
        }
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<Extent> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in values {
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    (count > 0).then(|| Extent {
        min,
        max,
        mean: sum / count as f64,
    })
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics:")?;
        writeln!(f)?;
        writeln!(f, "Rows: {}", self.rows)?;
        writeln!(f, "Columns: {}", self.columns)?;

        for summary in &self.numeric {
            writeln!(f)?;
            writeln!(f, "{}:", summary.column)?;
            match summary.extent {
                Some(Extent { min, max, mean }) => {
                    writeln!(f, "  Min: {min}")?;
                    writeln!(f, "  Max: {max}")?;
                    writeln!(f, "  Mean: {mean:.2}")?;
                }
                None => writeln!(f, "  no values")?,
            }
        }
        Ok(())
    }
}
