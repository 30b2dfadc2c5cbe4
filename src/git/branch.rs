//! Resolves which ticket the current branch is working on.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde::Serialize;

use crate::matcher::compile_regex;

/// Reports the name of the checked-out branch.
pub trait BranchResolver {
    /// `None` when the branch cannot be determined (no repository, detached HEAD, ...).
    fn current_branch(&self) -> Option<String>;
}

/// Reads `HEAD` through gix. No child process is involved.
#[derive(Debug, Clone)]
pub struct GitBranchResolver {
    start: PathBuf,
}

impl GitBranchResolver {
    #[must_use]
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
        }
    }
}

impl BranchResolver for GitBranchResolver {
    fn current_branch(&self) -> Option<String> {
        branch_at(&self.start)
    }
}

fn branch_at(path: &Path) -> Option<String> {
    let repo = gix::discover(path).ok()?;
    repo.head_name()
        .ok()
        .flatten()
        .map(|name| name.shorten().to_string().trim().to_string())
        .filter(|name| !name.is_empty())
}

/// First `PREFIX-<digits>` token in `branch` for any of `prefixes`.
///
/// `feature/PROJ-123-login` gives `PROJ-123`.
#[must_use]
pub fn extract_ticket_id(branch: &str, prefixes: &IndexSet<String>) -> Option<String> {
    if branch.is_empty() || prefixes.is_empty() {
        return None;
    }
    // Underscores count as separators in branch names: `PROJ-12_fix`.
    let alternation: Vec<_> = prefixes.iter().map(|p| regex::escape(p)).collect();
    let pattern = format!(r"(?:^|[^A-Za-z0-9])(?P<ticket>(?:{})-\d+)", alternation.join("|"));
    let re = compile_regex(&pattern).ok()?;
    re.captures(branch)
        .and_then(|caps| caps.name("ticket"))
        .map(|m| m.as_str().to_string())
}

/// Where the current ticket ID came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "kebab-case")]
pub enum TicketContext {
    /// Supplied with `--ticket-id`.
    Explicit { ticket: String },
    Detected { branch: String, ticket: String },
    NoTicket { branch: String },
    /// Branch lookup failed or was disabled.
    Unknown,
}

impl TicketContext {
    /// Resolve the ticket context. An explicit ticket wins over branch detection.
    #[must_use]
    pub fn resolve(
        explicit: Option<&str>,
        resolver: Option<&dyn BranchResolver>,
        prefixes: &IndexSet<String>,
    ) -> Self {
        if let Some(ticket) = explicit {
            return Self::Explicit {
                ticket: ticket.to_string(),
            };
        }
        let Some(branch) = resolver.and_then(|r| r.current_branch()) else {
            return Self::Unknown;
        };
        match extract_ticket_id(&branch, prefixes) {
            Some(ticket) => Self::Detected { branch, ticket },
            None => Self::NoTicket { branch },
        }
    }

    #[must_use]
    pub fn ticket(&self) -> Option<&str> {
        match self {
            Self::Explicit { ticket } | Self::Detected { ticket, .. } => Some(ticket),
            Self::NoTicket { .. } | Self::Unknown => None,
        }
    }

    /// Note shown in verbose mode when no ticket could be determined.
    #[must_use]
    pub fn note(&self) -> Option<String> {
        match self {
            Self::Unknown => Some("Note: Unable to detect current git branch".to_string()),
            Self::NoTicket { branch } => Some(format!(
                "Note: No ticket ID detected in current branch '{branch}'"
            )),
            Self::Explicit { .. } | Self::Detected { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "branch_tests.rs"]
mod tests;
