//! CLI presentation: text and json formatters for both commands.

use crate::error::HubError;
use crate::review::ReviewOutcome;
use serde_json::json;
use std::path::PathBuf;

pub const REVIEW_RESULTS_HEADER: &str = "=== CODEX REVIEW RESULTS ===";

pub fn format_applied_paths(paths: &[PathBuf], format: &str) -> Result<String, HubError> {
    match format {
        "json" => {
            let out = json!({ "updated": paths });
            to_pretty(&out)
        }
        "text" => {
            let mut s = String::from("Applied user policy to:");
            for path in paths {
                s.push_str(&format!("\n- {}", path.display()));
            }
            Ok(s)
        }
        other => Err(invalid_format(other)),
    }
}

/// Summary when one was extracted, raw output otherwise.
pub fn format_review_outcome(outcome: &ReviewOutcome, format: &str) -> Result<String, HubError> {
    match format {
        "json" => to_pretty(outcome),
        "text" => Ok(format!(
            "\n{}\n\n{}",
            REVIEW_RESULTS_HEADER,
            outcome.display_text()
        )),
        other => Err(invalid_format(other)),
    }
}

fn to_pretty<T: serde::Serialize>(value: &T) -> Result<String, HubError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| HubError::ConfigError(format!("Failed to render JSON output: {}", e)))
}

fn invalid_format(format: &str) -> HubError {
    HubError::Usage(format!(
        "Invalid output format: {} (must be 'text' or 'json')",
        format
    ))
}
