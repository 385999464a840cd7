//! Error types surfaced on the viewer's status line.

use std::path::PathBuf;

/// Loading the CSV source failed
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Line {line}: invalid {column} value '{value}'")]
    InvalidField {
        line: usize,
        column: &'static str,
        value: String,
    },
}

/// A manually entered row was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid date format '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("{column} must be a number, got '{value}'")]
    InvalidNumber { column: &'static str, value: String },
    #[error("Load a dataset before adding rows")]
    NotLoaded,
}

/// A chart could not be produced
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("No dataset loaded")]
    NotLoaded,
    #[error("Dataset has no rows to plot")]
    NoData,
}

/// Any failure of a viewer operation
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("Failed to load data: {0}")]
    Data(#[from] DataError),
    #[error("Failed to add data: {0}")]
    Validation(#[from] ValidationError),
    #[error("Failed to update chart: {0}")]
    Render(#[from] RenderError),
}
