//! CLI route: run context and the two command handlers.

use crate::cli::parse::{PolicyCli, ReviewCli};
use crate::cli::presentation::{format_applied_paths, format_review_outcome};
use crate::cli::setup::resolve_hub_dir;
use crate::config::{ConfigLoader, HubConfig};
use crate::error::HubError;
use crate::policy::{apply_policy, default_policy_path, load_policy, resolve_home_dir};
use crate::review::{CodexReviewer, ReviewCategory, ReviewRequest};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Runtime context for CLI execution: loaded configuration and hub root.
pub struct RunContext {
    config: HubConfig,
    hub_dir: Option<PathBuf>,
}

impl RunContext {
    /// Load configuration from an explicit file, or by discovery around `hub_dir`.
    pub fn new(config_path: Option<&Path>, hub_dir: Option<PathBuf>) -> Result<Self, HubError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(hub_dir.as_deref())?,
        };

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            HubError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        Ok(Self { config, hub_dir })
    }

    /// Context with an already-built configuration.
    pub fn with_config(config: HubConfig, hub_dir: Option<PathBuf>) -> Self {
        Self { config, hub_dir }
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// `apply-policy`: merge the policy into both settings files.
    pub fn apply_policy(&self, cli: &PolicyCli) -> Result<String, HubError> {
        let policy_path = match (&cli.policy, &self.config.policy.file) {
            (Some(path), _) | (None, Some(path)) => path.clone(),
            (None, None) => {
                let hub_dir = match &self.hub_dir {
                    Some(dir) => dir.clone(),
                    None => resolve_hub_dir(None)?,
                };
                default_policy_path(&hub_dir)
            }
        };
        let home = match &cli.home {
            Some(home) => home.clone(),
            None => resolve_home_dir()?,
        };

        info!(policy = %policy_path.display(), home = %home.display(), "Applying user policy");
        let policy = load_policy(&policy_path)?;
        let updated = apply_policy(&home, &policy)?;

        format_applied_paths(&updated, &cli.format)
    }

    /// `codex-review`: run one canned review and render its result.
    pub fn review(&self, cli: &ReviewCli) -> Result<String, HubError> {
        let request = build_request(cli)?;

        let mut review_config = self.config.review.clone();
        if let Some(ref model) = cli.model {
            review_config.model = model.clone();
        }
        if cli.raw {
            review_config.json_output = false;
        }
        let sandbox = cli.sandbox.unwrap_or(review_config.sandbox);

        let reviewer = CodexReviewer::from_config(&review_config);
        let outcome = reviewer.review(&request, sandbox, cli.output_file.as_deref());

        if !outcome.success {
            return Err(HubError::ReviewFailed(
                outcome
                    .error
                    .unwrap_or_else(|| "Codex review failed".to_string()),
            ));
        }

        format_review_outcome(&outcome, &cli.format)
    }
}

/// Map the positional arguments onto a canned review.
pub fn build_request(cli: &ReviewCli) -> Result<ReviewRequest, HubError> {
    let category: ReviewCategory = cli.category.parse().map_err(HubError::Usage)?;
    let target = cli.target.clone();

    if cli.extra.is_some()
        && !matches!(category, ReviewCategory::Architecture | ReviewCategory::Diff)
    {
        warn!(category = %category, "Ignoring extra argument for this review type");
    }

    let request = match category {
        ReviewCategory::Security => ReviewRequest::Security { target },
        ReviewCategory::Performance => ReviewRequest::Performance { target },
        ReviewCategory::Architecture => ReviewRequest::Architecture {
            target,
            context: cli.extra.clone().unwrap_or_default(),
        },
        ReviewCategory::Quality => ReviewRequest::Quality { target },
        ReviewCategory::Diff => ReviewRequest::Diff {
            base: cli
                .extra
                .clone()
                .unwrap_or_else(|| ReviewRequest::DEFAULT_DIFF_BASE.to_string()),
            head: target,
        },
        ReviewCategory::Focused => {
            if cli.focus.is_empty() {
                return Err(HubError::Usage(
                    "focused review needs at least one --focus area".to_string(),
                ));
            }
            ReviewRequest::Focused {
                target,
                focus_areas: cli.focus.clone(),
            }
        }
    };

    Ok(request)
}
