//! Process setup shared by both binaries: argument parsing, hub dir, logging.

use crate::cli::parse::CommonArgs;
use crate::config::ConfigLoader;
use crate::error::HubError;
use crate::logging::LoggingConfig;
use clap::Parser;
use std::path::PathBuf;

/// Parse arguments; usage errors exit with status 1, `--help`/`--version` with 0.
pub fn parse_or_exit<P: Parser>() -> P {
    match P::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

/// Resolve the hub installation root.
///
/// An explicit `--hub-dir` (or `AGENTHUB_HUB_DIR`) wins; otherwise the root is
/// two levels above the running executable (`<hub>/bin/apply-policy`).
pub fn resolve_hub_dir(explicit: Option<PathBuf>) -> Result<PathBuf, HubError> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    let exe = std::env::current_exe().map_err(|e| {
        HubError::ConfigError(format!("Could not locate the running executable: {}", e))
    })?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent()
        .and_then(|bin| bin.parent())
        .map(|hub| hub.to_path_buf())
        .ok_or_else(|| {
            HubError::ConfigError(format!(
                "Could not derive hub directory from {}; pass --hub-dir",
                exe.display()
            ))
        })
}

/// Build logging configuration from CLI args and config file.
///
/// Logging stays off unless `--verbose` is given; explicit `--log-*` flags
/// then override the config file.
pub fn build_logging_config(args: &CommonArgs) -> LoggingConfig {
    if !args.verbose {
        return LoggingConfig::off();
    }

    let mut config = if let Some(ref config_path) = args.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        let hub_dir = resolve_hub_dir(args.hub_dir.clone()).ok();
        ConfigLoader::load(hub_dir.as_deref())
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if let Some(ref level) = args.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = args.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = args.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = args.log_file {
        config.file = Some(file.clone());
        if args.log_output.is_none() {
            config.output = "file".to_string();
        }
    }

    config
}
