//! Integration tests for the agenthub binaries

mod apply_policy_cli;
mod test_utils;

pub use test_utils::*;
