//! Agenthub: local AI tooling helpers
//!
//! Two independent one-shot utilities: a policy merger that grants the hub's
//! user policy in Claude and Gemini settings files, and a review invoker that
//! runs canned `codex exec` reviews and extracts their final message.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod policy;
pub mod review;
