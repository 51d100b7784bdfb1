//! Config loader: assembles the layered sources into a `HubConfig`.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{env, global_file, hub_file};
use super::HubConfig;
use config::{ConfigError, File};
use std::path::Path;
use tracing::debug;

/// Loads `HubConfig` from defaults, files, and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load with file discovery.
    ///
    /// Precedence (lowest to highest): defaults, global file, hub files, environment.
    pub fn load(hub_dir: Option<&Path>) -> Result<HubConfig, ConfigError> {
        let mut builder = builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        if let Some(hub_dir) = hub_dir {
            builder = hub_file::add_to_builder(builder, hub_dir)?;
        }
        builder = env::add_to_builder(builder);

        let config: HubConfig = builder.build()?.try_deserialize()?;
        debug!(hub_dir = ?hub_dir, "Configuration loaded");
        Ok(config)
    }

    /// Load from one explicit file (no discovery); environment still applies.
    pub fn load_from_file(path: &Path) -> Result<HubConfig, ConfigError> {
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = env::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }
}
