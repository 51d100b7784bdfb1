//! Hub config directory source: `<hub>/config/config.toml`, then `<hub>/config/<AGENTHUB_ENV>.toml`

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_HUB_ENV: &str = "development";

/// Files layered from the hub directory, lowest precedence first.
pub fn hub_config_files(hub_dir: &Path) -> Vec<PathBuf> {
    let env_name = std::env::var("AGENTHUB_ENV").unwrap_or_else(|_| DEFAULT_HUB_ENV.to_string());
    let config_dir = hub_dir.join("config");
    vec![
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env_name)),
    ]
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    hub_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = hub_config_files(hub_dir)
        .into_iter()
        .filter(|path| path.exists())
        .fold(builder, |builder, path| {
            debug!(config_path = %path.display(), "Layering hub config file");
            builder.add_source(File::from(path).required(false))
        });
    Ok(builder)
}
