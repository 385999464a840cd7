//! Configuration module for lab-kit.
//!
//! Supports both command-line arguments and TOML configuration file.
//! CLI arguments take precedence over config file values.

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Command-line arguments for lab-kit
#[derive(Parser, Debug)]
#[command(name = "lab-kit")]
#[command(author = "lab-kit authors")]
#[command(version = "0.1.0")]
#[command(about = "Single-shot TCP echo listener and CSV dataset viewer", long_about = None)]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Which exercise to run
#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Accept one TCP connection, echo its first message, then exit
    Echo {
        /// Address to bind to (e.g., 127.0.0.1:30001)
        #[arg(short = 'l', long)]
        listen: Option<String>,

        /// Maximum number of bytes read from the peer
        #[arg(long)]
        chunk_size: Option<usize>,
    },
    /// Open the dataset viewer window
    Viewer {
        /// CSV file loaded by the "Load" button
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

/// TOML configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub echo: EchoConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Echo listener configuration
#[derive(Debug, Deserialize)]
pub struct EchoConfig {
    /// Address to bind to
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Read size for the single echo
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            chunk_size: default_chunk_size(),
        }
    }
}

/// Dataset viewer configuration
#[derive(Debug, Deserialize)]
pub struct ViewerConfig {
    /// Fixed CSV source
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:30001".to_string()
}

fn default_chunk_size() -> usize {
    1024
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("sample_data.csv")
}

fn default_window_width() -> f32 {
    900.0
}

fn default_window_height() -> f32 {
    600.0
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Resolved echo listener settings
#[derive(Debug, Clone)]
pub struct EchoSettings {
    pub listen: SocketAddr,
    pub chunk_size: usize,
}

/// Resolved viewer settings
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    pub csv_path: PathBuf,
    pub window_size: [f32; 2],
}

/// The exercise selected on the command line, with its settings
#[derive(Debug, Clone)]
pub enum Mode {
    Echo(EchoSettings),
    Viewer(ViewerSettings),
}

/// Final resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub log_level: String,
}

impl Config {
    /// Load configuration from CLI args and optional TOML file.
    /// CLI arguments take precedence over TOML file values.
    pub fn load() -> Result<Self, ConfigError> {
        let cli = CliArgs::parse();

        // Load TOML config if specified
        let toml_config = if let Some(ref config_path) = cli.config {
            let contents = std::fs::read_to_string(config_path)
                .map_err(|e| ConfigError::FileRead(config_path.clone(), e))?;
            toml::from_str(&contents)
                .map_err(|e| ConfigError::TomlParse(config_path.clone(), e))?
        } else {
            TomlConfig::default()
        };

        Self::resolve(cli, toml_config)
    }

    /// Merge parsed CLI args with a parsed TOML config.
    pub fn resolve(cli: CliArgs, toml_config: TomlConfig) -> Result<Self, ConfigError> {
        let mode = match cli.command {
            CliCommand::Echo { listen, chunk_size } => {
                let listen = listen.unwrap_or(toml_config.echo.listen);
                let addr = listen
                    .parse()
                    .map_err(|_| ConfigError::InvalidListen(listen.clone()))?;
                let chunk_size = chunk_size.unwrap_or(toml_config.echo.chunk_size);
                if chunk_size == 0 {
                    return Err(ConfigError::ZeroChunkSize);
                }
                Mode::Echo(EchoSettings {
                    listen: addr,
                    chunk_size,
                })
            }
            CliCommand::Viewer { csv } => Mode::Viewer(ViewerSettings {
                csv_path: csv.unwrap_or(toml_config.viewer.csv_path),
                window_size: [
                    toml_config.viewer.window_width,
                    toml_config.viewer.window_height,
                ],
            }),
        };

        Ok(Config {
            mode,
            log_level: if cli.log_level != "info" {
                cli.log_level
            } else {
                toml_config.logging.level
            },
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {1}", path = .0.display())]
    FileRead(PathBuf, #[source] std::io::Error),
    #[error("Failed to parse config file '{path}': {1}", path = .0.display())]
    TomlParse(PathBuf, #[source] toml::de::Error),
    #[error("Invalid listen address '{0}', expected host:port")]
    InvalidListen(String),
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,
}
