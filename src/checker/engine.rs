use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::config::{Config, ConfigFilter, EmptyStagePolicy, NoFilter};
use crate::error::Result;
use crate::git::RepositoryFileLister;
use crate::matcher::MatcherSet;
use crate::output::print_warning;
use crate::path_utils::path_key;
use crate::scanner::{BatchScanner, lines_for};

use super::classify::FileClassification;
use super::report::{Report, StagedSet, assemble};

/// Runs one check over the supplied files and, optionally, the rest of the repository.
pub struct TodoChecker<'a> {
    config: &'a Config,
    matchers: MatcherSet,
    scanner: BatchScanner<'a>,
    lister: Option<&'a dyn RepositoryFileLister>,
    filter: &'a dyn ConfigFilter,
}

impl<'a> TodoChecker<'a> {
    /// # Errors
    /// Returns an error if the configured prefixes do not compile into matchers.
    pub fn new(config: &'a Config, scanner: BatchScanner<'a>) -> Result<Self> {
        Ok(Self {
            config,
            matchers: MatcherSet::compile(config)?,
            scanner,
            lister: None,
            filter: &NoFilter,
        })
    }

    /// Source of files for unstaged checking.
    #[must_use]
    pub fn with_lister(mut self, lister: &'a dyn RepositoryFileLister) -> Self {
        self.lister = Some(lister);
        self
    }

    /// Project-level include/exclude rules applied to discovered files.
    #[must_use]
    pub fn with_filter(mut self, filter: &'a dyn ConfigFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Check `files` and build the report.
    ///
    /// With no files and unstaged checking off this is a no-op that reports success.
    #[must_use]
    pub fn check(&self, files: &[PathBuf]) -> Report {
        if files.is_empty() && !self.config.check_unstaged {
            return Report::empty(self.config);
        }

        let requested = dedup(files.iter().cloned());
        let mut staged = StagedSet::new(&requested);
        let discovered = if self.config.check_unstaged {
            self.discover(&staged)
        } else {
            Vec::new()
        };

        if requested.is_empty()
            && self.config.empty_stage_policy == EmptyStagePolicy::RepositoryIsStaged
        {
            staged = StagedSet::new(&discovered);
        }

        let files_to_check: Vec<PathBuf> = requested.into_iter().chain(discovered).collect();
        let scanned = self.scanner.scan_many(&files_to_check, &self.matchers);
        let current_ticket = self.config.current_ticket_id.as_deref();

        let classified: HashMap<PathBuf, FileClassification> = files_to_check
            .iter()
            .map(|path| {
                let lines = lines_for(&scanned, path);
                (
                    path.clone(),
                    FileClassification::from_lines(lines, &self.matchers, current_ticket),
                )
            })
            .collect();

        assemble(&files_to_check, &staged, &classified, self.config)
    }

    /// Repository files not already requested, after project filtering.
    fn discover(&self, staged: &StagedSet) -> Vec<PathBuf> {
        let Some(lister) = self.lister else {
            return Vec::new();
        };
        let listed = match lister.list_files() {
            Ok(listed) => listed,
            Err(e) => {
                print_warning(&format!("Could not list repository files: {e}"));
                return Vec::new();
            }
        };
        let unstaged = dedup(listed.into_iter().filter(|p| !staged.contains(p)));
        self.filter.filter(unstaged)
    }
}

/// Drop repeated spellings of the same file, keeping the first.
fn dedup(paths: impl Iterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths.filter(|p| seen.insert(path_key(p))).collect()
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
