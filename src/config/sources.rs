//! Config sources, in the order they are layered.

pub mod env;
pub mod global_file;
pub mod hub_file;
