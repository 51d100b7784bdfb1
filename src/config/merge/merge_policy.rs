//! Merge rules: built-in defaults that every other source overrides.

use crate::review::{DEFAULT_MODEL, DEFAULT_PROGRAM, DEFAULT_TIMEOUT};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("review.program", DEFAULT_PROGRAM)?
        .set_default("review.model", DEFAULT_MODEL)?
        .set_default("review.json_output", true)?
        .set_default("review.sandbox", "read-only")?
        .set_default("review.timeout_secs", DEFAULT_TIMEOUT.as_secs())
}
