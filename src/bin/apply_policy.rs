//! apply-policy binary
//!
//! Merges the hub's user policy into ~/.claude and ~/.gemini settings.

use agenthub::cli::{
    build_logging_config, map_error, parse_or_exit, resolve_hub_dir, PolicyCli, RunContext,
};
use agenthub::logging::init_logging;
use std::process;
use tracing::{error, info};

fn main() {
    let cli: PolicyCli = parse_or_exit();

    let logging_config = build_logging_config(&cli.common);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("apply-policy starting");

    let hub_dir = resolve_hub_dir(cli.common.hub_dir.clone()).ok();
    let context = match RunContext::new(cli.common.config.as_deref(), hub_dir) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.apply_policy(&cli) {
        Ok(output) => {
            info!("Policy applied");
            println!("{}", output);
        }
        Err(e) => {
            error!("apply-policy failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}
