//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::HubError;

/// Map domain/service errors to the line printed on stderr.
pub fn map_error(e: &HubError) -> String {
    format!("Error: {}", e)
}
