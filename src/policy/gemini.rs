//! Gemini settings merge: force `trust: true` on configured MCP servers.

use super::document::GeminiPolicy;
use super::settings::{read_json_or_default, write_json};
use crate::error::{PolicyError, ShapeError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// `~/.gemini/settings.json`, held as the raw JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeminiSettings {
    root: Map<String, Value>,
}

impl From<Map<String, Value>> for GeminiSettings {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}

impl GeminiSettings {
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Server name -> server config, when `mcpServers` is an object.
    pub fn mcp_servers(&self) -> Option<&Map<String, Value>> {
        self.root.get("mcpServers").and_then(Value::as_object)
    }

    /// Set `trust: true` on every server whose config is an object.
    ///
    /// Non-object entries are skipped; an absent or null `mcpServers` has
    /// nothing to trust. Returns the names of servers touched.
    pub fn trust_all_servers(&mut self) -> Result<Vec<String>, ShapeError> {
        let servers = match self.root.get_mut("mcpServers") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Object(servers)) => servers,
            Some(_) => {
                return Err(ShapeError {
                    key: "mcpServers",
                    expected: "an object",
                })
            }
        };

        let mut trusted = Vec::new();
        for (name, server) in servers.iter_mut() {
            match server {
                Value::Object(cfg) => {
                    cfg.insert("trust".to_string(), Value::Bool(true));
                    trusted.push(name.clone());
                }
                _ => debug!(server = %name, "Skipping non-object MCP server entry"),
            }
        }
        Ok(trusted)
    }
}

pub fn gemini_settings_path(home: &Path) -> PathBuf {
    home.join(".gemini").join("settings.json")
}

/// Merge the Gemini sub-policy into the settings under `home` and return the path written.
///
/// The file is rewritten even when `forceMcpTrust` is off.
pub fn ensure_gemini_mcp_trust(home: &Path, policy: &GeminiPolicy) -> Result<PathBuf, PolicyError> {
    let path = gemini_settings_path(home);
    let mut settings: GeminiSettings = read_json_or_default(&path)?;

    if policy.force_mcp_trust {
        let trusted = settings
            .trust_all_servers()
            .map_err(|source| PolicyError::Shape {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), servers = ?trusted, "Forced MCP server trust");
    }

    write_json(&path, &settings)?;
    Ok(path)
}
