//! Policy Merger
//!
//! Applies the hub's user policy document to the per-user settings files of
//! Claude and Gemini. Both merges are append-only and idempotent: running them
//! twice leaves the files byte-identical after the first run, and keys this
//! module does not know about are carried through untouched.

mod claude;
mod document;
mod gemini;
mod settings;

pub use claude::{claude_settings_path, ensure_claude_permissions, ClaudeSettings};
pub use document::{default_policy_path, load_policy, ClaudePolicy, GeminiPolicy, PolicyDocument};
pub use gemini::{ensure_gemini_mcp_trust, gemini_settings_path, GeminiSettings};
pub use settings::{read_json_or_default, write_json};

use crate::error::PolicyError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Apply both sub-policies under `home` and return every path written.
///
/// Both routines run even when their sub-policy is empty, so each target file
/// is always normalized and rewritten.
pub fn apply_policy(home: &Path, policy: &PolicyDocument) -> Result<Vec<PathBuf>, PolicyError> {
    let mut updated = Vec::with_capacity(2);
    updated.push(ensure_claude_permissions(home, &policy.claude)?);
    updated.push(ensure_gemini_mcp_trust(home, &policy.gemini)?);
    info!(home = %home.display(), files = updated.len(), "Applied user policy");
    Ok(updated)
}

/// Resolve the home directory the policy is applied to.
///
/// `$HOME` wins when set so tests and sandboxes can redirect it; otherwise the
/// platform home directory is used.
pub fn resolve_home_dir() -> Result<PathBuf, PolicyError> {
    if let Some(home) = std::env::var_os("HOME").filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(PolicyError::HomeNotFound)
}
