//! Codex `--json` event stream parsing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

const ITEM_COMPLETED: &str = "item.completed";
const AGENT_MESSAGE: &str = "agent_message";

/// One record of the newline-delimited JSON stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEvent {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<EventItem>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Payload of `item.*` events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventItem {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl ReviewEvent {
    /// Text of a completed agent message, if this is one.
    pub fn agent_message_text(&self) -> Option<&str> {
        if self.kind.as_deref() != Some(ITEM_COMPLETED) {
            return None;
        }
        let item = self.item.as_ref()?;
        if item.kind.as_deref() != Some(AGENT_MESSAGE) {
            return None;
        }
        item.text.as_deref()
    }
}

/// Parse JSON-lines output, skipping blank lines and lines that are not event objects.
pub fn parse_jsonl(text: &str) -> Vec<ReviewEvent> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<ReviewEvent>(line) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!(error = %e, "Skipping unparseable event line");
                None
            }
        })
        .collect()
}

/// The most recent completed agent message in the stream.
pub fn extract_summary(events: &[ReviewEvent]) -> Option<String> {
    events
        .iter()
        .rev()
        .find(|event| {
            event.kind.as_deref() == Some(ITEM_COMPLETED)
                && event
                    .item
                    .as_ref()
                    .and_then(|item| item.kind.as_deref())
                    == Some(AGENT_MESSAGE)
        })
        .and_then(|event| event.agent_message_text())
        .map(str::to_string)
}
