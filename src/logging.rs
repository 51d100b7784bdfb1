//! Logging System
//!
//! Structured logging using the `tracing` crate. Log level, format, and
//! destination are configurable. Logs go to stderr by default because stdout
//! carries command results.

use crate::error::HubError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output is "file"); defaults to the platform state directory
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Logging fully disabled.
    pub fn off() -> Self {
        Self {
            level: "off".to_string(),
            ..Self::default()
        }
    }
}

/// Default log file: `$XDG_STATE_HOME/agenthub/agenthub.log` (or the platform equivalent).
pub fn default_log_file() -> Result<PathBuf, HubError> {
    let dirs = directories::ProjectDirs::from("", "", "agenthub").ok_or_else(|| {
        HubError::ConfigError("Could not determine a directory for the log file".to_string())
    })?;
    let base = dirs
        .state_dir()
        .unwrap_or_else(|| dirs.data_local_dir())
        .to_path_buf();
    Ok(base.join("agenthub.log"))
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (AGENTHUB_LOG, AGENTHUB_LOG_FORMAT, AGENTHUB_LOG_OUTPUT)
/// 2. The passed config (CLI flags already applied over the config file)
/// 3. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), HubError> {
    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let (writer, ansi) = match determine_output(config)? {
        Output::Stdout => (BoxMakeWriter::new(std::io::stdout), use_color),
        Output::Stderr => (BoxMakeWriter::new(std::io::stderr), use_color),
        Output::File => (BoxMakeWriter::new(Mutex::new(open_log_file(config)?)), false),
    };

    let layer = fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(ansi)
        .with_writer(writer);
    let registry = Registry::default().with(filter);

    let result = if format == "json" {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };
    result.map_err(|e| HubError::ConfigError(format!("Failed to install log subscriber: {}", e)))
}

/// Open (appending) the configured log file, or the default one.
fn open_log_file(config: Option<&LoggingConfig>) -> Result<File, HubError> {
    let log_file = match config.and_then(|c| c.file.clone()) {
        Some(path) => path,
        None => default_log_file()?,
    };

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| HubError::ConfigError(format!("Failed to create log directory: {}", e)))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            HubError::ConfigError(format!("Failed to open log file {}: {}", log_file.display(), e))
        })
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, HubError> {
    if let Ok(filter) = EnvFilter::try_from_env("AGENTHUB_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");

    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(level);

    if let Some(config) = config {
        for (module, module_level) in &config.modules {
            let directive = format!("{}={}", module, module_level);
            filter = filter.add_directive(
                directive
                    .parse()
                    .map_err(|e| HubError::ConfigError(format!("Invalid log directive: {}", e)))?,
            );
        }
    }

    if let Ok(modules_str) = std::env::var("AGENTHUB_LOG_MODULES") {
        for module_spec in modules_str.split(',') {
            let parts: Vec<&str> = module_spec.split('=').collect();
            if parts.len() == 2 {
                let directive = format!("{}={}", parts[0].trim(), parts[1].trim());
                filter = filter.add_directive(directive.parse().map_err(|e| {
                    HubError::ConfigError(format!("Invalid log directive from env: {}", e))
                })?);
            }
        }
    }

    Ok(filter)
}

/// Determine output format from config or environment
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, HubError> {
    if let Ok(format) = std::env::var("AGENTHUB_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");

    if format != "json" && format != "text" {
        return Err(HubError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }

    Ok(format.to_string())
}

/// Output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

/// Determine output destination from config or environment
fn determine_output(config: Option<&LoggingConfig>) -> Result<Output, HubError> {
    if let Ok(output) = std::env::var("AGENTHUB_LOG_OUTPUT") {
        return parse_output(&output);
    }

    let output = config.map(|c| c.output.as_str()).unwrap_or("stderr");

    parse_output(output)
}

fn parse_output(output: &str) -> Result<Output, HubError> {
    match output {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        _ => Err(HubError::ConfigError(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            output
        ))),
    }
}
