//! Finds the lines of a file that contain a work-comment keyword.

mod batch;
mod process;

pub use batch::{
    BATCH_THRESHOLD, BatchScanner, LineSearcher, RipgrepSearcher, SEARCH_TIMEOUT, ScanMap,
    SequentialSearcher, lines_for,
};
pub use process::{ProcessOutput, run_with_timeout};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, TodoGuardError};
use crate::matcher::MatcherSet;
use crate::output::print_warning;

/// A line that contains a work-comment keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedLine {
    pub path: PathBuf,
    /// 1-based.
    pub line_number: usize,
    /// Line content with trailing whitespace removed.
    pub text: String,
}

impl ScannedLine {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, line_number: usize, text: &str) -> Self {
        Self {
            path: path.into(),
            line_number,
            text: text.trim_end().to_string(),
        }
    }
}

/// Abstraction over file reads so scans can be exercised without the real filesystem.
pub trait FileReader {
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Real filesystem implementation of `FileReader`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileReader;

impl FileReader for RealFileReader {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        if path.is_dir() {
            // Treated like a vanished path by the scanner.
            return Err(io::Error::new(io::ErrorKind::NotFound, "is a directory"));
        }
        fs::read(path)
    }
}

/// Per-file line scanner.
pub struct FileScanner<'a> {
    matchers: &'a MatcherSet,
    reader: &'a dyn FileReader,
}

impl<'a> FileScanner<'a> {
    #[must_use]
    pub const fn new(matchers: &'a MatcherSet, reader: &'a dyn FileReader) -> Self {
        Self { matchers, reader }
    }

    /// Best-effort scan: missing files yield nothing, other read failures are
    /// reported as warnings and also yield nothing.
    #[must_use]
    pub fn scan(&self, path: &Path) -> Vec<ScannedLine> {
        match self.try_scan(path) {
            Ok(lines) => lines,
            Err(e) => {
                print_warning(&format!("Could not read {}: {e}", path.display()));
                Vec::new()
            }
        }
    }

    /// Scan reporting read failures other than "file missing".
    ///
    /// # Errors
    /// Returns `TodoGuardError::FileRead` when the file exists but cannot be read.
    pub fn try_scan(&self, path: &Path) -> Result<Vec<ScannedLine>> {
        let bytes = match self.reader.read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(TodoGuardError::FileRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Ok(self.scan_bytes(path, &bytes))
    }

    /// Invalid UTF-8 is replaced rather than rejected.
    #[must_use]
    pub fn scan_bytes(&self, path: &Path, bytes: &[u8]) -> Vec<ScannedLine> {
        let content = String::from_utf8_lossy(bytes);
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| self.matchers.is_work_comment(line))
            .map(|(idx, line)| ScannedLine::new(path, idx + 1, line))
            .collect()
    }
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
