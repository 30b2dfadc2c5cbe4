use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::path_utils::path_key;
use crate::{EXIT_SUCCESS, EXIT_VIOLATIONS};

use super::classify::{ClassifiedLine, FileClassification};

/// Files the caller explicitly asked to check.
#[derive(Debug, Clone, Default)]
pub struct StagedSet {
    keys: HashSet<PathBuf>,
}

impl StagedSet {
    #[must_use]
    pub fn new<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) -> Self {
        Self {
            keys: paths.into_iter().map(|p| path_key(p)).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.keys.contains(&path_key(path))
    }
}

/// Per-file outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    pub path: PathBuf,
    /// Violations in staged files block, the rest are advisory.
    pub is_staged: bool,
    pub violations: Vec<ClassifiedLine>,
    pub is_clean: bool,
}

impl FileResult {
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        self.is_staged && !self.is_clean
    }
}

/// A work comment that references the current branch's ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketTodo {
    #[serde(flatten)]
    pub line: ClassifiedLine,
    pub is_staged: bool,
}

/// Everything the presentation layer needs from one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub files: Vec<FileResult>,
    pub ticket_todos: Vec<TicketTodo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_ticket_id: Option<String>,
    /// Whether any blocking violation exists, regardless of `succeed_always`.
    pub has_blocking: bool,
    pub exit_code: i32,
}

impl Report {
    /// Clean report for a run that checked nothing.
    #[must_use]
    pub fn empty(config: &Config) -> Self {
        Self {
            files: Vec::new(),
            ticket_todos: Vec::new(),
            current_ticket_id: config.current_ticket_id.clone(),
            has_blocking: false,
            exit_code: EXIT_SUCCESS,
        }
    }

    pub fn blocking_files(&self) -> impl Iterator<Item = &FileResult> {
        self.files.iter().filter(|f| f.is_blocking())
    }

    pub fn advisory_files(&self) -> impl Iterator<Item = &FileResult> {
        self.files.iter().filter(|f| !f.is_staged && !f.is_clean)
    }

    #[must_use]
    pub fn blocking_count(&self) -> usize {
        self.blocking_files().map(|f| f.violations.len()).sum()
    }

    #[must_use]
    pub fn advisory_count(&self) -> usize {
        self.advisory_files().map(|f| f.violations.len()).sum()
    }
}

/// Build the final report.
///
/// `files_to_check` fixes the display order. `succeed_always` only overrides
/// `exit_code`; `has_blocking` and everything else stay as computed.
#[must_use]
pub fn assemble(
    files_to_check: &[PathBuf],
    staged: &StagedSet,
    classified: &HashMap<PathBuf, FileClassification>,
    config: &Config,
) -> Report {
    let mut files = Vec::with_capacity(files_to_check.len());
    let mut ticket_todos = Vec::new();

    for path in files_to_check {
        let is_staged = staged.contains(path);
        let classification = classified.get(path);
        let violations = classification.map_or_else(Vec::new, |c| c.violations.clone());

        if let Some(c) = classification {
            ticket_todos.extend(c.ticket_todos.iter().map(|line| TicketTodo {
                line: line.clone(),
                is_staged,
            }));
        }

        files.push(FileResult {
            path: path.clone(),
            is_staged,
            is_clean: violations.is_empty(),
            violations,
        });
    }

    let has_blocking = files.iter().any(FileResult::is_blocking);
    let exit_code = if has_blocking && !config.succeed_always {
        EXIT_VIOLATIONS
    } else {
        EXIT_SUCCESS
    };

    Report {
        files,
        ticket_todos,
        current_ticket_id: config.current_ticket_id.clone(),
        has_blocking,
        exit_code,
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
