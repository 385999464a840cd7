//! lab-kit: two small standalone exercises
//!
//! - `echo`: a TCP listener that accepts one client, echoes its first
//!   message and exits
//! - `viewer`: a desktop window that loads a CSV dataset, accepts manual
//!   rows, draws line/bar/pie charts and shows summary statistics
//!
//! Configuration via CLI arguments or TOML file.

mod config;
mod echo;
mod viewer;

use config::{Config, Mode};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match config.mode {
        Mode::Echo(settings) => run_echo(settings),
        Mode::Viewer(settings) => run_viewer(settings),
    }
}

/// Serve a single echo session
fn run_echo(settings: config::EchoSettings) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        listen = %settings.listen,
        chunk_size = settings.chunk_size,
        "Starting echo listener"
    );
    echo::run(&settings)?;
    Ok(())
}

/// Open the dataset viewer window
fn run_viewer(settings: config::ViewerSettings) -> Result<(), Box<dyn std::error::Error>> {
    info!(csv = %settings.csv_path.display(), "Starting dataset viewer");
    viewer::run(&settings)?;
    Ok(())
}
