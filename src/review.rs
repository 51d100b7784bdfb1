//! Review Invoker
//!
//! Runs the external `codex` CLI non-interactively with one of a handful of
//! canned review prompts, bounded by a timeout, and pulls the final agent
//! message out of its JSON-lines event stream.

mod events;
mod invoker;
mod prompts;

pub use events::{extract_summary, parse_jsonl, EventItem, ReviewEvent};
pub use invoker::{
    CodexReviewer, ReviewOutcome, StructuredOutput, DEFAULT_MODEL, DEFAULT_PROGRAM,
    DEFAULT_TIMEOUT,
};
pub use prompts::{ReasoningEffort, ReviewCategory, ReviewRequest, SandboxMode};
