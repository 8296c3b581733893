//! Structured logging setup.
//!
//! The SDK only emits `tracing` events; applications that want them on stdout
//! or in a file call [`init_logging`] once at startup.
//!
//! ```bash
//! # Cache and request tracing from the SDK only
//! RUST_LOG=warn,opentool_hyperliquid=debug cargo run
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use crate::{prelude::*, Error};

const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable format with colors (default for development)
    #[default]
    Pretty,
    /// JSON format (best for log aggregation)
    Json,
    /// Compact single-line format
    Compact,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LogConfig {
    /// Directory for the rolling JSON log file, if any.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    #[serde(default = "default_enable_stdout")]
    pub enable_stdout: bool,

    #[serde(default)]
    pub stdout_format: LogFormat,
}

fn default_file_prefix() -> String {
    "opentool-hyperliquid.log".to_string()
}

fn default_enable_stdout() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            file_prefix: default_file_prefix(),
            enable_stdout: default_enable_stdout(),
            stdout_format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    /// Pretty stdout, no files.
    pub fn development() -> Self {
        Self::default()
    }

    /// JSON stdout plus a daily-rotated JSON file under `log_dir`.
    pub fn production(log_dir: PathBuf) -> Self {
        Self {
            log_dir: Some(log_dir),
            stdout_format: LogFormat::Json,
            ..Default::default()
        }
    }
}

fn build_filter(env_filter_override: Option<&str>) -> Result<EnvFilter> {
    match env_filter_override {
        Some(filter) => EnvFilter::try_new(filter)
            .map_err(|e| Error::config(format!("invalid log filter {filter:?}: {e}"))),
        None => match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(DEFAULT_FILTER).map_err(|e| Error::config(e.to_string())),
        },
    }
}

/// Install the global subscriber.
///
/// Returns the `WorkerGuard`s of non-blocking writers; they must be kept alive
/// for buffered lines to be flushed.
pub fn init_logging(
    config: &LogConfig,
    env_filter_override: Option<&str>,
) -> Result<Vec<WorkerGuard>> {
    let filter = build_filter(env_filter_override)?;
    let mut guards = Vec::new();

    let stdout_layer = config.enable_stdout.then(|| match config.stdout_format {
        LogFormat::Json => fmt::layer().json().boxed(),
        LogFormat::Compact => fmt::layer().compact().boxed(),
        LogFormat::Pretty => fmt::layer().with_target(false).boxed(),
    });

    let file_layer = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::config(format!("cannot create {}: {e}", dir.display())))?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            guards.push(guard);
            Some(fmt::layer().with_writer(writer).with_ansi(false).json())
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::config(format!("logging already initialized: {e}")))?;

    Ok(guards)
}
