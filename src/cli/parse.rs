//! CLI parse: clap types for both binaries. No behavior; definitions only.

use crate::review::SandboxMode;
use clap::{Args, Parser};
use std::path::PathBuf;

/// Logging and config flags shared by both binaries
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Hub installation root (defaults to two levels above the executable)
    #[arg(long, env = "AGENTHUB_HUB_DIR")]
    pub hub_dir: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Apply the hub's user policy to Claude and Gemini settings
#[derive(Parser, Debug)]
#[command(name = "apply-policy")]
#[command(about = "Apply the hub's user policy to Claude and Gemini settings")]
pub struct PolicyCli {
    /// Policy document (defaults to <hub-dir>/policy/user-policy.json)
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Home directory whose settings are updated (defaults to $HOME)
    #[arg(long)]
    pub home: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run a canned Codex code review
#[derive(Parser, Debug)]
#[command(name = "codex-review")]
#[command(about = "Run a canned Codex code review")]
#[command(after_help = "Review types:
  security      Security audit
  performance   Performance analysis
  architecture  Architecture review ([extra] is free-text context)
  quality       Code quality review
  diff          Git diff review (<target> is the head ref, [extra] the base ref, default main)
  focused       Review limited to the --focus areas

Example:
  codex-review security src/auth/")]
pub struct ReviewCli {
    /// Review type
    pub category: String,

    /// What to review (file, directory, or description)
    pub target: String,

    /// Architecture context, or base ref for `diff`
    pub extra: Option<String>,

    /// Focus area for `focused` reviews (repeatable)
    #[arg(long = "focus")]
    pub focus: Vec<String>,

    /// Model identifier (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Sandbox tier (overrides config)
    #[arg(long, value_enum)]
    pub sandbox: Option<SandboxMode>,

    /// Ask for plain text instead of the JSON event stream
    #[arg(long)]
    pub raw: bool,

    /// Also write the raw process output to this file
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    #[command(flatten)]
    pub common: CommonArgs,
}
