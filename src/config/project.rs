//! Path filtering sourced from the project's pre-commit configuration.
//!
//! Only the hook entry whose `id` is [`HOOK_ID`] contributes rules. Top-level
//! `files`/`exclude` keys apply as well, the way pre-commit itself applies them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, TodoGuardError};
use crate::matcher::compile_regex;

use super::file_types::tags_for_path;

/// Hook id looked up in `.pre-commit-config.yaml`.
pub const HOOK_ID: &str = "prevent-dangling-todos";

/// Narrows a list of candidate paths.
pub trait ConfigFilter {
    fn filter(&self, paths: Vec<PathBuf>) -> Vec<PathBuf>;
}

/// Filter that keeps every path.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFilter;

impl ConfigFilter for NoFilter {
    fn filter(&self, paths: Vec<PathBuf>) -> Vec<PathBuf> {
        paths
    }
}

#[derive(Debug, Default, Deserialize)]
struct PreCommitFile {
    #[serde(default)]
    files: Option<String>,
    #[serde(default)]
    exclude: Option<String>,
    #[serde(default)]
    repos: Vec<RepoEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct RepoEntry {
    #[serde(default)]
    hooks: Vec<HookEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct HookEntry {
    #[serde(default)]
    id: String,
    #[serde(default, alias = "include")]
    files: Option<String>,
    #[serde(default)]
    exclude: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    types_or: Vec<String>,
    #[serde(default)]
    exclude_types: Vec<String>,
}

/// Include/exclude regexes and type tags for this tool's hook entry.
#[derive(Debug, Default)]
pub struct PreCommitFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
    types: Vec<String>,
    types_or: Vec<String>,
    exclude_types: Vec<String>,
}

impl PreCommitFilter {
    /// Load rules from a pre-commit configuration file.
    ///
    /// Returns `Ok(None)` when the file does not exist or has no entry for this hook.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid YAML, or holds an
    /// invalid regex.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(TodoGuardError::FileRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_yaml_str(&content)
    }

    /// Parse rules from pre-commit YAML content.
    ///
    /// # Errors
    /// Returns an error for malformed YAML or invalid `files`/`exclude` regexes.
    pub fn from_yaml_str(content: &str) -> Result<Option<Self>> {
        if content.trim().is_empty() {
            return Ok(None);
        }
        let parsed: PreCommitFile = serde_yaml::from_str(content)?;

        let Some(hook) = parsed
            .repos
            .into_iter()
            .flat_map(|repo| repo.hooks)
            .find(|hook| hook.id == HOOK_ID)
        else {
            return Ok(None);
        };

        let include = [parsed.files, hook.files]
            .into_iter()
            .flatten()
            .map(|p| compile_regex(&p))
            .collect::<Result<Vec<_>>>()?;
        let exclude = [parsed.exclude, hook.exclude]
            .into_iter()
            .flatten()
            .map(|p| compile_regex(&p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Self {
            include,
            exclude,
            types: hook.types,
            types_or: hook.types_or,
            exclude_types: hook.exclude_types,
        }))
    }

    fn should_include(&self, path: &Path) -> bool {
        let normalized = path.to_string_lossy().replace('\\', "/");

        if !self.include.iter().all(|re| re.is_match(&normalized)) {
            return false;
        }
        if self.exclude.iter().any(|re| re.is_match(&normalized)) {
            return false;
        }

        let tags = tags_for_path(path);
        let has = |tag: &String| tags.contains(tag.as_str());
        self.types.iter().all(has)
            && (self.types_or.is_empty() || self.types_or.iter().any(has))
            && !self.exclude_types.iter().any(has)
    }
}

impl ConfigFilter for PreCommitFilter {
    fn filter(&self, paths: Vec<PathBuf>) -> Vec<PathBuf> {
        paths.into_iter().filter(|p| self.should_include(p)).collect()
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
