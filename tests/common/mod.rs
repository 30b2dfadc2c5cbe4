#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Environment variables the binary reads; cleared so the host shell cannot leak in.
pub const TOOL_ENV_VARS: &[&str] = &[
    "JIRA_PREFIX",
    "COMMENT_PREFIX",
    "CHECK_UNSTAGED",
    "SUCCEED_ALWAYS",
];

/// Creates an `assert_cmd` Command for the prevent-dangling-todos binary
/// with a clean tool environment.
#[macro_export]
macro_rules! prevent_dangling_todos {
    () => {{
        let mut cmd =
            assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("prevent-dangling-todos"));
        for var in $crate::common::TOOL_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd
    }};
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a pre-commit configuration whose hook carries the given extra keys.
    pub fn create_pre_commit_config(&self, hook_body: &str) {
        let content = format!(
            "repos:\n  - repo: local\n    hooks:\n      - id: prevent-dangling-todos\n{hook_body}"
        );
        self.create_file(".pre-commit-config.yaml", &content);
    }

    /// Turns the directory into a git repository. Returns false when git is unavailable.
    pub fn init_git(&self) -> bool {
        self.git(&["init", "-q"])
            && self.git(&["config", "user.email", "test@test.com"])
            && self.git(&["config", "user.name", "Test User"])
    }

    /// Runs git in the fixture directory, reporting whether it succeeded.
    pub fn git(&self, args: &[&str]) -> bool {
        Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .is_ok_and(|out| out.status.success())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// One referenced and one dangling comment of each common kind.
pub const MIXED_PY: &str = "\
# TODO: dangling todo
# TODO PROJ-1: tracked todo
def main():
    pass  # FIXME broken edge case
    # XXX PROJ-2: known workaround
";

/// Every work comment carries a reference.
pub const CLEAN_PY: &str = "\
# TODO PROJ-1: tracked
x = 1  # FIXME PROJ-2: tracked too
";
