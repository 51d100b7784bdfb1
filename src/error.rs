//! Error types for the agenthub policy merger and review invoker.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Policy merge errors
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot update {path}: {source}")]
    Shape {
        path: PathBuf,
        #[source]
        source: ShapeError,
    },

    #[error("Could not determine home directory (set HOME or pass --home)")]
    HomeNotFound,
}

/// A settings key the merge must modify holds a value of the wrong JSON type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{key}` must be {expected}")]
pub struct ShapeError {
    pub key: &'static str,
    pub expected: &'static str,
}

/// Review invocation errors.
///
/// These never escape `CodexReviewer::run_review`; they are folded into a
/// failed `ReviewOutcome` and only exist to keep the failure messages in one place.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Codex CLI `{0}` not found. Please install it first.")]
    NotInstalled(String),

    #[error("Codex review timed out after {}", format_timeout(.0))]
    TimedOut(Duration),

    #[error("Unexpected error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected error: failed to write output file {path}: {source}")]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected error: failed to start async runtime: {0}")]
    Runtime(std::io::Error),
}

fn format_timeout(timeout: &Duration) -> String {
    let secs = timeout.as_secs();
    match secs {
        0 => format!("{} ms", timeout.as_millis()),
        60 => "1 minute".to_string(),
        s if s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "1 second".to_string(),
        s => format!("{} seconds", s),
    }
}

/// CLI-level errors surfaced by both binaries
#[derive(Debug, Error)]
pub enum HubError {
    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    ReviewFailed(String),
}

impl From<config::ConfigError> for HubError {
    fn from(err: config::ConfigError) -> Self {
        HubError::ConfigError(err.to_string())
    }
}
