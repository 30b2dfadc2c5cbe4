use std::collections::HashMap;

use tempfile::TempDir;

use super::*;
use crate::config::{Config, DEFAULT_COMMENT_PREFIXES};

const FILE_WITH_VIOLATIONS: &str = "\
# Test file with various TODO patterns

# TODO: This is a violation - no Jira reference
def function1():
    pass


# FIXME: Another violation without ticket
def function2():
    # TODO MYJIRA-123: This one is properly referenced
    return True


# XXX: Missing Jira reference here
class TestClass:
    # HACK MYJIRA-456: Properly referenced hack
    def method(self):
        # BUG: This bug has no ticket
        pass


# REVIEW: Need to review this code
# OPTIMIZE: Performance could be better
# REFACTOR: This needs refactoring

# Properly formatted comments:
# TODO MYJIRA-789: Complete implementation
# FIXME MYJIRA-101: Handle edge cases
";

const CLEAN_FILE: &str = "\
def authenticate():
    # Regular comment without keywords
    return None
";

fn default_matchers() -> MatcherSet {
    MatcherSet::compile(&Config::with_prefixes(&["MYJIRA"], DEFAULT_COMMENT_PREFIXES)).unwrap()
}

struct FakeReader {
    files: HashMap<PathBuf, io::Result<Vec<u8>>>,
}

impl FakeReader {
    fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    fn with(mut self, path: &str, result: io::Result<Vec<u8>>) -> Self {
        self.files.insert(PathBuf::from(path), result);
        self
    }
}

impl FileReader for FakeReader {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.files.get(path) {
            Some(Ok(bytes)) => Ok(bytes.clone()),
            Some(Err(e)) => Err(io::Error::new(e.kind(), e.to_string())),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "missing")),
        }
    }
}

#[test]
fn finds_every_work_comment_line_in_order() {
    let m = default_matchers();
    let reader = FakeReader::new().with("v.py", Ok(FILE_WITH_VIOLATIONS.as_bytes().to_vec()));
    let scanner = FileScanner::new(&m, &reader);

    let lines = scanner.scan(Path::new("v.py"));
    let numbers: Vec<_> = lines.iter().map(|l| l.line_number).collect();

    // Line 1 mentions "TODO" as well.
    assert_eq!(numbers, vec![1, 3, 8, 10, 14, 16, 18, 22, 23, 24, 27, 28]);
    assert_eq!(lines[1].text, "# TODO: This is a violation - no Jira reference");
}

#[test]
fn clean_file_yields_nothing() {
    let m = default_matchers();
    let reader = FakeReader::new().with("c.py", Ok(CLEAN_FILE.as_bytes().to_vec()));
    let scanner = FileScanner::new(&m, &reader);

    assert!(scanner.scan(Path::new("c.py")).is_empty());
}

#[test]
fn missing_file_yields_nothing_without_error() {
    let m = default_matchers();
    let reader = FakeReader::new();
    let scanner = FileScanner::new(&m, &reader);

    assert!(scanner.try_scan(Path::new("gone.py")).unwrap().is_empty());
    assert!(scanner.scan(Path::new("gone.py")).is_empty());
}

#[test]
fn unreadable_file_is_reported_by_try_scan() {
    let m = default_matchers();
    let reader = FakeReader::new().with(
        "locked.py",
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
    );
    let scanner = FileScanner::new(&m, &reader);

    let err = scanner.try_scan(Path::new("locked.py")).unwrap_err();
    assert!(matches!(err, TodoGuardError::FileRead { .. }));
    // Best-effort variant degrades to no lines.
    assert!(scanner.scan(Path::new("locked.py")).is_empty());
}

#[test]
fn invalid_utf8_is_decoded_lossily() {
    let m = default_matchers();
    let scanner = FileScanner::new(&m, &RealFileReader);

    let lines = scanner.scan_bytes(Path::new("bin.dat"), b"ok\n# TODO \xff\xfe here\n");

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].line_number, 2);
    assert_eq!(lines[0].text, "# TODO \u{FFFD}\u{FFFD} here");
}

#[test]
fn crlf_and_trailing_whitespace_are_trimmed() {
    let m = default_matchers();
    let scanner = FileScanner::new(&m, &RealFileReader);

    let lines = scanner.scan_bytes(Path::new("w.py"), b"# TODO: a   \r\n# FIXME\t\r\n");

    assert_eq!(lines[0].text, "# TODO: a");
    assert_eq!(lines[1].text, "# FIXME");
}

#[test]
fn last_line_without_newline_is_scanned() {
    let m = default_matchers();
    let scanner = FileScanner::new(&m, &RealFileReader);

    let lines = scanner.scan_bytes(Path::new("n.py"), b"x = 1\n# TODO end");

    assert_eq!(lines, vec![ScannedLine::new("n.py", 2, "# TODO end")]);
}

#[test]
fn scanning_is_idempotent() {
    let m = default_matchers();
    let scanner = FileScanner::new(&m, &RealFileReader);

    let first = scanner.scan_bytes(Path::new("v.py"), FILE_WITH_VIOLATIONS.as_bytes());
    let second = scanner.scan_bytes(Path::new("v.py"), FILE_WITH_VIOLATIONS.as_bytes());

    assert_eq!(first, second);
}

#[test]
fn custom_comment_prefixes_limit_matches() {
    let m = MatcherSet::compile(&Config::with_prefixes(&["MYJIRA"], &["TODO"])).unwrap();
    let scanner = FileScanner::new(&m, &RealFileReader);

    let lines = scanner.scan_bytes(Path::new("v.py"), FILE_WITH_VIOLATIONS.as_bytes());

    assert!(lines.iter().all(|l| l.text.contains("TODO")));
    assert_eq!(lines.len(), 4);
}

#[test]
fn real_reader_treats_directory_as_missing() {
    let dir = TempDir::new().unwrap();
    let m = default_matchers();
    let scanner = FileScanner::new(&m, &RealFileReader);

    assert!(scanner.try_scan(dir.path()).unwrap().is_empty());
}

#[test]
fn real_reader_scans_files_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("v.py");
    std::fs::write(&path, FILE_WITH_VIOLATIONS).unwrap();
    let m = default_matchers();
    let scanner = FileScanner::new(&m, &RealFileReader);

    let lines = scanner.scan(&path);

    assert_eq!(lines.len(), 12);
    assert!(lines.iter().all(|l| l.path == path));
}
