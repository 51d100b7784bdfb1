//! CLI domain: parse, setup, route, output, and presentation only.
//! Domain work lives in `policy` and `review`; this layer wires flags to it.

mod output;
mod parse;
mod presentation;
mod route;
mod setup;

pub use output::map_error;
pub use parse::{CommonArgs, PolicyCli, ReviewCli};
pub use presentation::{format_applied_paths, format_review_outcome, REVIEW_RESULTS_HEADER};
pub use route::{build_request, RunContext};
pub use setup::{build_logging_config, parse_or_exit, resolve_hub_dir};
