//! Multi-file scanning with an optional accelerated line searcher.
//!
//! The accelerated path is purely a performance optimisation: for the same
//! inputs it must produce exactly what [`SequentialSearcher`] produces.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use crate::error::{Result, TodoGuardError};
use crate::matcher::MatcherSet;

use super::process::run_with_timeout;
use super::{FileReader, FileScanner, RealFileReader, ScannedLine};

/// Batches larger than this go to the accelerated searcher.
pub const BATCH_THRESHOLD: usize = 3;

/// Default timeout for the external search process.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

pub type ScanMap = HashMap<PathBuf, Vec<ScannedLine>>;

/// Searches many files at once for work-comment lines.
///
/// Files without matches may be absent from the returned map.
pub trait LineSearcher {
    /// # Errors
    /// Returns an error when the search as a whole could not be performed.
    fn search(&self, paths: &[PathBuf], matchers: &MatcherSet) -> Result<ScanMap>;
}

/// Reference implementation: one [`FileScanner`] pass per file.
pub struct SequentialSearcher<'a> {
    reader: &'a dyn FileReader,
}

impl<'a> SequentialSearcher<'a> {
    #[must_use]
    pub const fn new(reader: &'a dyn FileReader) -> Self {
        Self { reader }
    }
}

impl Default for SequentialSearcher<'_> {
    fn default() -> Self {
        Self {
            reader: &RealFileReader,
        }
    }
}

impl LineSearcher for SequentialSearcher<'_> {
    fn search(&self, paths: &[PathBuf], matchers: &MatcherSet) -> Result<ScanMap> {
        let scanner = FileScanner::new(matchers, self.reader);
        Ok(paths
            .iter()
            .map(|path| (path.clone(), scanner.scan(path)))
            .collect())
    }
}

/// Runs ripgrep once over every path.
#[derive(Debug, Clone)]
pub struct RipgrepSearcher {
    program: String,
    timeout: Duration,
}

impl Default for RipgrepSearcher {
    fn default() -> Self {
        Self {
            program: "rg".to_string(),
            timeout: SEARCH_TIMEOUT,
        }
    }
}

impl RipgrepSearcher {
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, paths: &[PathBuf], pattern: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args([
                "--no-config",
                "--no-heading",
                "--with-filename",
                "--line-number",
                "--color",
                "never",
                "--text",
                "--encoding",
                "none",
                "--no-messages",
                "-e",
                pattern,
                "--",
            ])
            .args(paths);
        command
    }

    /// Parse `path:line:content` records, splitting on the first two colons.
    ///
    /// Paths are resolved against `requested` so a colon inside a file name
    /// does not derail the split.
    #[must_use]
    pub fn parse_output(stdout: &[u8], requested: &[PathBuf]) -> ScanMap {
        let known: HashMap<String, &PathBuf> = requested
            .iter()
            .map(|p| (p.to_string_lossy().into_owned(), p))
            .collect();

        let mut map = ScanMap::new();
        for record in stdout.split(|b| *b == b'\n') {
            if record.is_empty() {
                continue;
            }
            let record = String::from_utf8_lossy(record);
            if let Some((path, line_number, content)) = split_record(&record, &known) {
                map.entry(path.clone())
                    .or_default()
                    .push(ScannedLine::new(path, line_number, content));
            }
        }
        map
    }
}

fn split_record<'r>(
    record: &'r str,
    known: &HashMap<String, &PathBuf>,
) -> Option<(PathBuf, usize, &'r str)> {
    let mut parts = record.splitn(3, ':');
    let path = parts.next()?;
    if let Some(&requested) = known.get(path) {
        let line_number = parts.next()?.parse().ok()?;
        return Some((requested.clone(), line_number, parts.next().unwrap_or_default()));
    }

    // Path itself contains a colon: take the longest requested path that prefixes the record.
    let (name, requested) = known
        .iter()
        .filter(|(name, _)| {
            record.len() > name.len()
                && record.starts_with(name.as_str())
                && record.as_bytes()[name.len()] == b':'
        })
        .max_by_key(|(name, _)| name.len())?;
    let rest = &record[name.len() + 1..];
    let (line_number, content) = rest.split_once(':')?;
    Some(((*requested).clone(), line_number.parse().ok()?, content))
}

impl LineSearcher for RipgrepSearcher {
    fn search(&self, paths: &[PathBuf], matchers: &MatcherSet) -> Result<ScanMap> {
        // Deleted files would make ripgrep report an error for the whole batch.
        let existing: Vec<PathBuf> = paths.iter().filter(|p| p.is_file()).cloned().collect();
        if existing.is_empty() {
            return Ok(ScanMap::new());
        }

        let output = run_with_timeout(
            self.command(&existing, matchers.comment_pattern()),
            self.timeout,
        )?;

        // 0 = matches found, 1 = no matches, anything else = failure.
        match output.status.code() {
            Some(0 | 1) => Ok(Self::parse_output(&output.stdout, &existing)),
            code => Err(TodoGuardError::ExternalTool {
                program: self.program.clone(),
                reason: format!(
                    "exited with {}: {}",
                    code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            }),
        }
    }
}

/// Scans many files, preferring the accelerated searcher for large batches.
pub struct BatchScanner<'a> {
    accelerated: Option<&'a dyn LineSearcher>,
    fallback: SequentialSearcher<'a>,
    threshold: usize,
}

impl<'a> BatchScanner<'a> {
    #[must_use]
    pub const fn new(reader: &'a dyn FileReader) -> Self {
        Self {
            accelerated: None,
            fallback: SequentialSearcher::new(reader),
            threshold: BATCH_THRESHOLD,
        }
    }

    #[must_use]
    pub const fn with_accelerated(mut self, searcher: &'a dyn LineSearcher) -> Self {
        self.accelerated = Some(searcher);
        self
    }

    #[must_use]
    pub const fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Every requested path appears in the result, with an empty list when it has no matches.
    #[must_use]
    pub fn scan_many(&self, paths: &[PathBuf], matchers: &MatcherSet) -> ScanMap {
        let mut map = self
            .accelerated_scan(paths, matchers)
            .unwrap_or_else(|| sequential_scan(&self.fallback, paths, matchers));
        for path in paths {
            map.entry(path.clone()).or_default();
        }
        map
    }

    fn accelerated_scan(&self, paths: &[PathBuf], matchers: &MatcherSet) -> Option<ScanMap> {
        if paths.len() <= self.threshold {
            return None;
        }
        self.accelerated?.search(paths, matchers).ok()
    }
}

fn sequential_scan(
    searcher: &SequentialSearcher<'_>,
    paths: &[PathBuf],
    matchers: &MatcherSet,
) -> ScanMap {
    searcher.search(paths, matchers).unwrap_or_default()
}

/// Lines for `path`, or an empty slice when it had none.
#[must_use]
pub fn lines_for<'m>(map: &'m ScanMap, path: &Path) -> &'m [ScannedLine] {
    map.get(path).map_or(&[], Vec::as_slice)
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
