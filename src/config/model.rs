use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::error::{Result, TodoGuardError};

/// Work-comment keywords checked when none are configured.
pub const DEFAULT_COMMENT_PREFIXES: &[&str] = &[
    "TODO", "FIXME", "XXX", "HACK", "BUG", "REVIEW", "OPTIMIZE", "REFACTOR",
];

/// `noqa` codes understood out of the box, keyed by the keyword they silence.
///
/// These are the `flake8-fixme` / ruff `FIX` codes.
pub const DEFAULT_SUPPRESSION_CODES: &[(&str, &str)] = &[
    ("FIXME", "FIX001"),
    ("TODO", "FIX002"),
    ("XXX", "FIX003"),
    ("HACK", "FIX004"),
];

/// How repository-discovered files are treated when the caller supplied no files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyStagePolicy {
    /// The whole filtered repository is the implicit staged set: violations block.
    #[default]
    RepositoryIsStaged,
    /// Discovered files stay advisory even though nothing was staged.
    AdvisoryOnly,
}

/// How much the presentation layer prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Standard,
    Verbose,
}

/// Resolved, validated configuration handed to the engine.
///
/// The engine only ever borrows this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Config {
    /// Accepted ticket prefixes. Empty means every work comment is a violation.
    pub ticket_prefixes: IndexSet<String>,
    /// Case-sensitive work-comment keywords, tried in order.
    pub comment_prefixes: IndexSet<String>,
    /// keyword -> `noqa` code that silences it.
    pub suppression_codes: IndexMap<String, String>,
    pub quiet: bool,
    pub verbose: bool,
    pub succeed_always: bool,
    pub check_unstaged: bool,
    /// Ticket the current branch is working on, if known.
    pub current_ticket_id: Option<String>,
    pub empty_stage_policy: EmptyStagePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ticket_prefixes: IndexSet::new(),
            comment_prefixes: DEFAULT_COMMENT_PREFIXES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            suppression_codes: default_suppression_codes(),
            quiet: false,
            verbose: false,
            succeed_always: false,
            check_unstaged: false,
            current_ticket_id: None,
            empty_stage_policy: EmptyStagePolicy::default(),
        }
    }
}

impl Config {
    /// Convenience constructor used mostly by tests and embedders.
    #[must_use]
    pub fn with_prefixes(ticket_prefixes: &[&str], comment_prefixes: &[&str]) -> Self {
        Self {
            ticket_prefixes: ticket_prefixes.iter().map(|s| (*s).to_string()).collect(),
            comment_prefixes: comment_prefixes.iter().map(|s| (*s).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Check the invariants that must hold before the engine runs.
    ///
    /// # Errors
    /// Returns `TodoGuardError::Config` for contradictory or empty settings.
    pub fn validate(&self) -> Result<()> {
        if self.quiet && self.verbose {
            return Err(TodoGuardError::Config(
                "--quiet and --verbose are mutually exclusive".to_string(),
            ));
        }
        if self.comment_prefixes.is_empty() {
            return Err(TodoGuardError::Config(
                "at least one comment prefix must be configured".to_string(),
            ));
        }
        if let Some(blank) = self
            .comment_prefixes
            .iter()
            .chain(self.ticket_prefixes.iter())
            .find(|p| p.trim().is_empty())
        {
            return Err(TodoGuardError::Config(format!(
                "prefixes cannot be blank: {blank:?}"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Standard
        }
    }

    /// True when no ticket reference can ever satisfy the check.
    #[must_use]
    pub fn disallows_all_comments(&self) -> bool {
        self.ticket_prefixes.is_empty()
    }
}

#[must_use]
pub fn default_suppression_codes() -> IndexMap<String, String> {
    DEFAULT_SUPPRESSION_CODES
        .iter()
        .map(|(keyword, code)| ((*keyword).to_string(), (*code).to_string()))
        .collect()
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
