//! Viewer state and the handlers behind each control.
//!
//! Every handler catches its own failure and writes it to the status line;
//! the `try_*` variants return the error for callers that want it.

use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::chart::{Chart, ChartSelection};
use super::dataset::{Dataset, NumericColumn, Record};
use super::error::{RenderError, ValidationError, ViewerError};
use super::ingest::{load_csv, parse_entry_date, parse_entry_value};
use super::stats::Summary;

/// All state of one viewer window
#[derive(Debug)]
pub struct Session {
    source: PathBuf,
    /// `None` until the first successful load
    dataset: Option<Dataset>,
    selection: ChartSelection,
    chart: Option<Chart>,
    stats: String,
    status: String,
}

impl Session {
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            dataset: None,
            selection: ChartSelection::default(),
            chart: None,
            stats: String::new(),
            status: String::new(),
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn selection(&self) -> ChartSelection {
        self.selection
    }

    /// The last successfully rendered chart
    pub fn chart(&self) -> Option<&Chart> {
        self.chart.as_ref()
    }

    pub fn stats(&self) -> &str {
        &self.stats
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// "Load" button.
    pub fn load(&mut self) {
        if let Err(e) = self.try_load() {
            self.fail(e);
        }
    }

    /// Replace the dataset with the CSV source, then redraw.
    ///
    /// On failure the previously held dataset is left untouched.
    pub fn try_load(&mut self) -> Result<(), ViewerError> {
        let dataset = load_csv(&self.source)?;
        info!(path = %self.source.display(), rows = dataset.len(), "Dataset loaded");

        self.dataset = Some(dataset);
        self.status.clear();
        self.render();
        self.refresh_stats();
        Ok(())
    }

    /// "Add" button.
    pub fn append(&mut self, date: &str, value1: &str, value2: &str) {
        match self.try_append(date, value1, value2) {
            Ok(()) => self.status.clear(),
            Err(e) => self.fail(e),
        }
    }

    /// Validate one manually entered row and append it.
    ///
    /// Nothing is modified unless every field parses.
    pub fn try_append(&mut self, date: &str, value1: &str, value2: &str) -> Result<(), ViewerError> {
        let dataset = self.dataset.as_mut().ok_or(ValidationError::NotLoaded)?;

        let date = parse_entry_date(date)?;
        let value1 = parse_entry_value(NumericColumn::Value1, value1)?;
        let value2 = parse_entry_value(NumericColumn::Value2, value2)?;

        let record = Record::manual(date, value1, value2);
        debug!(date = %record.date_text(), value1, value2, "Row appended");
        dataset.push(record);

        self.render();
        self.refresh_stats();
        Ok(())
    }

    /// Chart type selector.
    pub fn select_chart(&mut self, selection: ChartSelection) {
        self.selection = selection;
        self.render();
    }

    /// Redraw the chart for the current selection.
    pub fn render(&mut self) {
        match self.try_render() {
            Ok(()) => self.status.clear(),
            Err(e) => self.fail(e.into()),
        }
    }

    pub fn try_render(&mut self) -> Result<(), RenderError> {
        let dataset = self.dataset.as_ref().ok_or(RenderError::NotLoaded)?;
        let chart = Chart::render(dataset, self.selection);
        // A failed render clears the canvas
        self.chart = chart.as_ref().ok().cloned();
        chart.map(|_| ())
    }

    /// Recompute the stats panel. Without a dataset the panel keeps its text.
    pub fn refresh_stats(&mut self) {
        if let Some(dataset) = &self.dataset {
            self.stats = Summary::of(dataset).to_string();
        }
    }

    fn fail(&mut self, error: ViewerError) {
        warn!(error = %error, "Viewer operation failed");
        self.status = error.to_string();
    }
}
