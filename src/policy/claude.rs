//! Claude settings merge: grant permission tokens in `permissions.allow`.

use super::document::ClaudePolicy;
use super::settings::{read_json_or_default, write_json};
use crate::error::{PolicyError, ShapeError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// `~/.claude/settings.local.json`
///
/// Held as the raw JSON object so every key, value, and key position survives
/// a rewrite. Only `permissions.allow` is ever touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaudeSettings {
    root: Map<String, Value>,
}

impl From<Map<String, Value>> for ClaudeSettings {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}

impl ClaudeSettings {
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// String entries of `permissions.allow`, in file order.
    pub fn allowed(&self) -> Vec<&str> {
        self.root
            .get("permissions")
            .and_then(|p| p.get("allow"))
            .and_then(Value::as_array)
            .map(|allow| allow.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Append each token not already allowed, keeping policy order.
    ///
    /// `permissions` and `permissions.allow` are created when absent. Entries
    /// already in the list, strings or not, are left where they are. Returns
    /// the tokens that were actually added.
    pub fn grant(&mut self, tokens: &[String]) -> Result<Vec<String>, ShapeError> {
        let permissions = self
            .root
            .entry("permissions")
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or(ShapeError {
                key: "permissions",
                expected: "an object",
            })?;
        let allow = permissions
            .entry("allow")
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .ok_or(ShapeError {
                key: "permissions.allow",
                expected: "an array",
            })?;

        let mut present: HashSet<String> = allow
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        let mut added = Vec::new();
        for token in tokens {
            if present.insert(token.clone()) {
                allow.push(Value::String(token.clone()));
                added.push(token.clone());
            }
        }
        Ok(added)
    }
}

pub fn claude_settings_path(home: &Path) -> PathBuf {
    home.join(".claude").join("settings.local.json")
}

/// Merge the Claude sub-policy into the settings under `home` and return the path written.
pub fn ensure_claude_permissions(home: &Path, policy: &ClaudePolicy) -> Result<PathBuf, PolicyError> {
    let path = claude_settings_path(home);
    let mut settings: ClaudeSettings = read_json_or_default(&path)?;

    let added = settings
        .grant(&policy.permissions_allow)
        .map_err(|source| PolicyError::Shape {
            path: path.clone(),
            source,
        })?;
    if added.is_empty() {
        debug!(path = %path.display(), "Claude permissions already up to date");
    } else {
        info!(path = %path.display(), added = ?added, "Granted Claude permissions");
    }

    write_json(&path, &settings)?;
    Ok(path)
}
