//! Dataset viewer.
//!
//! A desktop window over an in-memory `Date, Value1, Value2, Category`
//! table:
//! - Load: read the configured CSV file, replacing the table
//! - Add: append one manually entered row
//! - Chart: line (`Value1`), bar (`Value2`) or pie (rows per `Category`)
//! - Statistics: row and column counts, min/max/mean per numeric column
//!
//! All behaviour lives in [`Session`]; the window code only forwards clicks
//! to it and draws what it holds.

mod app;
pub mod chart;
pub mod dataset;
mod draw;
pub mod error;
pub mod ingest;
pub mod session;
pub mod stats;

pub use app::ViewerApp;
pub use session::Session;

use crate::config::ViewerSettings;
use eframe::egui;

const WINDOW_TITLE: &str = "Data Analysis";

/// Open the viewer window and block until it is closed.
pub fn run(settings: &ViewerSettings) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(settings.window_size),
        ..Default::default()
    };

    let session = Session::new(settings.csv_path.clone());
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(ViewerApp::new(session)))),
    )
}
