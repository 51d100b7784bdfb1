//! Canned review prompts and the invocation tiers they map to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Codex `--sandbox` tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SandboxMode {
    #[default]
    ReadOnly,
    WorkspaceWrite,
    DangerFullAccess,
}

impl SandboxMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SandboxMode::ReadOnly => "read-only",
            SandboxMode::WorkspaceWrite => "workspace-write",
            SandboxMode::DangerFullAccess => "danger-full-access",
        }
    }
}

impl fmt::Display for SandboxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Codex `reasoning_effort` tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    #[default]
    Medium,
    High,
}

impl ReasoningEffort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningEffort::Low => "low",
            ReasoningEffort::Medium => "medium",
            ReasoningEffort::High => "high",
        }
    }
}

impl fmt::Display for ReasoningEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review category names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewCategory {
    Security,
    Performance,
    Architecture,
    Quality,
    Diff,
    Focused,
}

impl ReviewCategory {
    pub const ALL: [ReviewCategory; 6] = [
        ReviewCategory::Security,
        ReviewCategory::Performance,
        ReviewCategory::Architecture,
        ReviewCategory::Quality,
        ReviewCategory::Diff,
        ReviewCategory::Focused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewCategory::Security => "security",
            ReviewCategory::Performance => "performance",
            ReviewCategory::Architecture => "architecture",
            ReviewCategory::Quality => "quality",
            ReviewCategory::Diff => "diff",
            ReviewCategory::Focused => "focused",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ReviewCategory::Security => "Security audit",
            ReviewCategory::Performance => "Performance analysis",
            ReviewCategory::Architecture => "Architecture review",
            ReviewCategory::Quality => "Code quality review",
            ReviewCategory::Diff => "Git diff review",
            ReviewCategory::Focused => "Review limited to --focus areas",
        }
    }
}

impl fmt::Display for ReviewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReviewCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown review type: {}", s))
    }
}

/// A fully parameterized review: one variant per canned template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewRequest {
    Security { target: String },
    Performance { target: String },
    Architecture { target: String, context: String },
    Quality { target: String },
    Diff { base: String, head: String },
    Focused { target: String, focus_areas: Vec<String> },
}

impl ReviewRequest {
    pub const DEFAULT_DIFF_BASE: &'static str = "main";
    pub const DEFAULT_DIFF_HEAD: &'static str = "HEAD";

    pub fn category(&self) -> ReviewCategory {
        match self {
            ReviewRequest::Security { .. } => ReviewCategory::Security,
            ReviewRequest::Performance { .. } => ReviewCategory::Performance,
            ReviewRequest::Architecture { .. } => ReviewCategory::Architecture,
            ReviewRequest::Quality { .. } => ReviewCategory::Quality,
            ReviewRequest::Diff { .. } => ReviewCategory::Diff,
            ReviewRequest::Focused { .. } => ReviewCategory::Focused,
        }
    }

    /// Effort tier fixed by each template.
    pub fn reasoning_effort(&self) -> ReasoningEffort {
        match self {
            ReviewRequest::Security { .. }
            | ReviewRequest::Architecture { .. }
            | ReviewRequest::Diff { .. } => ReasoningEffort::High,
            ReviewRequest::Performance { .. }
            | ReviewRequest::Quality { .. }
            | ReviewRequest::Focused { .. } => ReasoningEffort::Medium,
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            ReviewRequest::Security { target } => format!(
                "Perform a thorough security audit of {target}. Check for:\n\
                 \n\
                 1. Authentication and authorization vulnerabilities\n\
                 2. Input validation issues (SQL injection, XSS, command injection)\n\
                 3. Cryptographic weaknesses\n\
                 4. Sensitive data exposure\n\
                 5. Rate limiting and DoS vulnerabilities\n\
                 6. Session management issues\n\
                 7. CSRF protection\n\
                 8. Security misconfiguration\n\
                 \n\
                 Provide:\n\
                 - Severity rating (Critical/High/Medium/Low) for each issue\n\
                 - Specific line numbers\n\
                 - Exploitation scenarios\n\
                 - Remediation recommendations"
            ),
            ReviewRequest::Performance { target } => format!(
                "Analyze {target} for performance issues:\n\
                 \n\
                 1. Algorithmic complexity problems (O(n²) where O(n) possible, etc.)\n\
                 2. Database query inefficiencies (N+1 queries, missing indexes)\n\
                 3. Memory leaks or excessive allocations\n\
                 4. Blocking operations that should be async\n\
                 5. Resource cleanup issues\n\
                 6. Caching opportunities\n\
                 7. Unnecessary computations in loops\n\
                 \n\
                 For each issue:\n\
                 - Explain the performance impact\n\
                 - Provide line numbers\n\
                 - Suggest optimized alternatives with code examples"
            ),
            ReviewRequest::Architecture { target, context } => {
                let context = context.trim();
                let intro = if context.is_empty() {
                    format!("Review the architecture of {target}.")
                } else {
                    format!("Review the architecture of {target}. {context}")
                };
                format!(
                    "{intro}\n\
                     \n\
                     Evaluate:\n\
                     1. Separation of concerns and modularity\n\
                     2. Coupling and cohesion\n\
                     3. Design pattern usage and appropriateness\n\
                     4. SOLID principles adherence\n\
                     5. Scalability considerations\n\
                     6. Maintainability and extensibility\n\
                     7. Error handling strategy\n\
                     8. Dependency management\n\
                     \n\
                     Provide:\n\
                     - Architectural strengths\n\
                     - Design issues or anti-patterns\n\
                     - Refactoring suggestions with reasoning\n\
                     - Alternative architectural approaches"
                )
            }
            ReviewRequest::Quality { target } => format!(
                "Review {target} for code quality:\n\
                 \n\
                 1. Complexity metrics (identify functions >20 lines or high cyclomatic complexity)\n\
                 2. Code duplication and DRY violations\n\
                 3. Naming conventions and clarity\n\
                 4. Comment quality and necessity\n\
                 5. Error handling completeness\n\
                 6. Function/method size and single responsibility\n\
                 7. Test coverage and testability\n\
                 8. Documentation completeness\n\
                 \n\
                 Rate code quality 1-10 and provide specific improvements."
            ),
            ReviewRequest::Diff { base, head } => format!(
                "Review the git diff between {base} and {head}:\n\
                 \n\
                 1. Identify breaking changes and backward compatibility issues\n\
                 2. Check for regression risks\n\
                 3. Evaluate test coverage for new/modified code\n\
                 4. Verify documentation updates\n\
                 5. Assess security implications of changes\n\
                 6. Check for performance regressions\n\
                 7. Review error handling in new code\n\
                 \n\
                 Organize feedback by:\n\
                 - File path\n\
                 - Severity (Critical/High/Medium/Low)\n\
                 - Type (Bug Risk/Breaking Change/Security/Performance/Quality)"
            ),
            ReviewRequest::Focused {
                target,
                focus_areas,
            } => {
                let areas = focus_areas
                    .iter()
                    .enumerate()
                    .map(|(i, area)| format!("{}. {}", i + 1, area))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "Review {target} focusing ONLY on these specific concerns:\n\
                     \n\
                     {areas}\n\
                     \n\
                     Ignore all other issues. Provide detailed analysis of only the specified areas."
                )
            }
        }
    }
}
