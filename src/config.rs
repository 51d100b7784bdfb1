//! Configuration System
//!
//! Layered configuration for both binaries: built-in defaults, the user's
//! global config file, the hub's own config directory, then `AGENTHUB__*`
//! environment variables. Everything here is an invocation parameter; nothing
//! is persisted back.

use crate::logging::LoggingConfig;
use crate::review::{SandboxMode, DEFAULT_MODEL, DEFAULT_PROGRAM, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubConfig {
    /// Codex review invocation settings
    #[serde(default)]
    pub review: ReviewConfig,

    /// Policy merge settings
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Codex review invocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Executable to run (name on PATH or absolute path)
    #[serde(default = "default_program")]
    pub program: String,

    /// Model identifier passed via `--model`
    #[serde(default = "default_model")]
    pub model: String,

    /// Request the JSON-lines event stream (`--json`)
    #[serde(default = "default_true")]
    pub json_output: bool,

    /// Sandbox tier passed via `--sandbox`
    #[serde(default)]
    pub sandbox: SandboxMode,

    /// Hard bound on a single review run
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            model: default_model(),
            json_output: default_true(),
            sandbox: SandboxMode::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Policy merge settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Policy document path; defaults to `<hub_dir>/policy/user-policy.json`
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Review(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Review(msg) => write!(f, "Review: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ReviewConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.program.trim().is_empty() {
            return Err("program cannot be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model cannot be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl HubConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.review.validate() {
            errors.push(ValidationError::Review(e));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            errors.push(ValidationError::Logging(format!(
                "invalid format '{}' (must be 'text' or 'json')",
                self.logging.format
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
