//! codex-review binary
//!
//! Usage: codex-review <category> <target> [extra]

use agenthub::cli::{
    build_logging_config, map_error, parse_or_exit, resolve_hub_dir, ReviewCli, RunContext,
};
use agenthub::logging::init_logging;
use std::process;
use tracing::{error, info};

fn main() {
    let cli: ReviewCli = parse_or_exit();

    let logging_config = build_logging_config(&cli.common);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(category = %cli.category, target = %cli.target, "codex-review starting");

    let hub_dir = resolve_hub_dir(cli.common.hub_dir.clone()).ok();
    let context = match RunContext::new(cli.common.config.as_deref(), hub_dir) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.review(&cli) {
        Ok(output) => {
            info!("Review completed");
            println!("{}", output);
        }
        Err(e) => {
            error!("Review failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}
