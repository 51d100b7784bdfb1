//! Codex subprocess invocation with a bounded timeout.

use super::events::{extract_summary, parse_jsonl, ReviewEvent};
use super::prompts::{ReasoningEffort, ReviewRequest, SandboxMode};
use crate::config::ReviewConfig;
use crate::error::ReviewError;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, info, warn};

pub const DEFAULT_PROGRAM: &str = "codex";
pub const DEFAULT_MODEL: &str = "gpt-5-codex";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Result of one review run. Never an `Err`: every failure is folded in here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewOutcome {
    pub success: bool,
    /// Raw stdout of the process; `None` when it never completed.
    pub output: Option<String>,
    pub error: Option<String>,
    /// Present only when structured (`--json`) output was requested.
    #[serde(flatten)]
    pub structured: Option<StructuredOutput>,
}

/// Parsed `--json` event stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredOutput {
    pub events: Vec<ReviewEvent>,
    pub summary: Option<String>,
}

impl ReviewOutcome {
    fn failed(err: ReviewError) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(err.to_string()),
            structured: None,
        }
    }

    pub fn summary(&self) -> Option<&str> {
        self.structured.as_ref()?.summary.as_deref()
    }

    /// What to show the user: the extracted summary, else the raw output.
    ///
    /// An empty summary counts as none.
    pub fn display_text(&self) -> &str {
        self.summary()
            .filter(|s| !s.is_empty())
            .or(self.output.as_deref())
            .unwrap_or_default()
    }
}

/// Runs reviews through the `codex exec` CLI.
#[derive(Debug, Clone)]
pub struct CodexReviewer {
    program: String,
    model: String,
    json_output: bool,
    timeout: Duration,
}

impl Default for CodexReviewer {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, true)
    }
}

impl CodexReviewer {
    pub fn new(model: impl Into<String>, json_output: bool) -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            model: model.into(),
            json_output,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_config(config: &ReviewConfig) -> Self {
        Self {
            program: config.program.clone(),
            model: config.model.clone(),
            json_output: config.json_output,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Use a different executable (name on `PATH` or a path).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn json_output(&self) -> bool {
        self.json_output
    }

    /// Arguments passed to the program, prompt last.
    pub fn command_args(
        &self,
        prompt: &str,
        sandbox: SandboxMode,
        reasoning_effort: ReasoningEffort,
    ) -> Vec<String> {
        let mut args = vec![
            "exec".to_string(),
            "--model".to_string(),
            self.model.clone(),
            "--sandbox".to_string(),
            sandbox.as_str().to_string(),
            "--config".to_string(),
            format!("reasoning_effort={}", reasoning_effort),
        ];
        if self.json_output {
            args.push("--json".to_string());
        }
        args.push(prompt.to_string());
        args
    }

    /// Run one review, blocking the calling thread until the process exits or times out.
    ///
    /// Must not be called from inside a tokio runtime; use [`Self::run_review_async`] there.
    pub fn run_review(
        &self,
        prompt: &str,
        sandbox: SandboxMode,
        reasoning_effort: ReasoningEffort,
        output_file: Option<&Path>,
    ) -> ReviewOutcome {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => return ReviewOutcome::failed(ReviewError::Runtime(e)),
        };
        runtime.block_on(self.run_review_async(prompt, sandbox, reasoning_effort, output_file))
    }

    pub async fn run_review_async(
        &self,
        prompt: &str,
        sandbox: SandboxMode,
        reasoning_effort: ReasoningEffort,
        output_file: Option<&Path>,
    ) -> ReviewOutcome {
        info!(
            program = %self.program,
            model = %self.model,
            sandbox = %sandbox,
            reasoning_effort = %reasoning_effort,
            timeout_secs = self.timeout.as_secs(),
            "Starting codex review"
        );

        let captured = match self.execute(prompt, sandbox, reasoning_effort).await {
            Ok(captured) => captured,
            Err(e) => {
                warn!(error = %e, "Codex review failed");
                return ReviewOutcome::failed(e);
            }
        };

        if let Some(path) = output_file {
            if let Err(source) = tokio::fs::write(path, &captured.stdout).await {
                return ReviewOutcome::failed(ReviewError::OutputFile {
                    path: path.to_path_buf(),
                    source,
                });
            }
            debug!(path = %path.display(), "Saved raw review output");
        }

        let success = captured.status.success();
        let error = if success {
            None
        } else if captured.stderr.trim().is_empty() {
            Some(format!("{} exited with {}", self.program, captured.status))
        } else {
            Some(captured.stderr)
        };

        let structured = self.json_output.then(|| {
            let events = parse_jsonl(&captured.stdout);
            let summary = extract_summary(&events);
            debug!(events = events.len(), has_summary = summary.is_some(), "Parsed review events");
            StructuredOutput { events, summary }
        });

        info!(success, status = %captured.status, "Codex review finished");
        ReviewOutcome {
            success,
            output: Some(captured.stdout),
            error,
            structured,
        }
    }

    /// Run a canned review with its fixed effort tier.
    pub fn review(
        &self,
        request: &ReviewRequest,
        sandbox: SandboxMode,
        output_file: Option<&Path>,
    ) -> ReviewOutcome {
        info!(category = %request.category(), "Running canned review");
        self.run_review(
            &request.prompt(),
            sandbox,
            request.reasoning_effort(),
            output_file,
        )
    }

    pub fn security_review(&self, target: &str) -> ReviewOutcome {
        self.canned(ReviewRequest::Security {
            target: target.to_string(),
        })
    }

    pub fn performance_review(&self, target: &str) -> ReviewOutcome {
        self.canned(ReviewRequest::Performance {
            target: target.to_string(),
        })
    }

    pub fn architecture_review(&self, target: &str, context: &str) -> ReviewOutcome {
        self.canned(ReviewRequest::Architecture {
            target: target.to_string(),
            context: context.to_string(),
        })
    }

    pub fn code_quality_review(&self, target: &str) -> ReviewOutcome {
        self.canned(ReviewRequest::Quality {
            target: target.to_string(),
        })
    }

    pub fn diff_review(&self, base: &str, head: &str) -> ReviewOutcome {
        self.canned(ReviewRequest::Diff {
            base: base.to_string(),
            head: head.to_string(),
        })
    }

    pub fn focused_review(&self, target: &str, focus_areas: &[String]) -> ReviewOutcome {
        self.canned(ReviewRequest::Focused {
            target: target.to_string(),
            focus_areas: focus_areas.to_vec(),
        })
    }

    fn canned(&self, request: ReviewRequest) -> ReviewOutcome {
        self.review(&request, SandboxMode::ReadOnly, None)
    }

    async fn execute(
        &self,
        prompt: &str,
        sandbox: SandboxMode,
        reasoning_effort: ReasoningEffort,
    ) -> Result<CapturedOutput, ReviewError> {
        let mut child = Command::new(&self.program)
            .args(self.command_args(prompt, sandbox, reasoning_effort))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ReviewError::NotInstalled(self.program.clone()),
                _ => ReviewError::Io(e),
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let waited = tokio::time::timeout(self.timeout, async {
            let (status, stdout, stderr) =
                tokio::join!(child.wait(), read_to_string(stdout), read_to_string(stderr));
            Ok::<_, std::io::Error>(CapturedOutput {
                status: status?,
                stdout: stdout?,
                stderr: stderr?,
            })
        })
        .await;

        match waited {
            Ok(captured) => Ok(captured?),
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "Codex review timed out, killing process");
                if let Err(e) = child.kill().await {
                    debug!(error = %e, "Failed to kill timed-out codex process");
                }
                Err(ReviewError::TimedOut(self.timeout))
            }
        }
    }
}

struct CapturedOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

async fn read_to_string<R: AsyncRead + Unpin>(pipe: Option<R>) -> std::io::Result<String> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
