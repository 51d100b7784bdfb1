//! Policy document: what the hub wants granted in each tool's settings.

use super::settings::read_json_or_default;
use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root policy document (`policy/user-policy.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyDocument {
    pub claude: ClaudePolicy,
    pub gemini: GeminiPolicy,
}

/// Claude sub-policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClaudePolicy {
    /// Permission tokens to grant, in the order they should be appended.
    pub permissions_allow: Vec<String>,
}

/// Gemini sub-policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeminiPolicy {
    /// Mark every configured MCP server as trusted.
    pub force_mcp_trust: bool,
}

/// Location of the policy document relative to the hub installation root.
pub fn default_policy_path(hub_dir: &Path) -> PathBuf {
    hub_dir.join("policy").join("user-policy.json")
}

/// Load the policy document; a missing file is an empty policy.
pub fn load_policy(path: &Path) -> Result<PolicyDocument, PolicyError> {
    read_json_or_default(path)
}
