use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use indexmap::IndexSet;

use crate::error::{Result, TodoGuardError};

/// Paths never worth scanning for work comments: assets, prose, tests, CI and package metadata.
const EXCLUDED_PATTERNS: &[&str] = &[
    // binary and image assets
    "**/*.{png,jpg,jpeg,gif,bmp,ico,icns,svg,webp,tif,tiff,psd,pdf}",
    "**/*.{zip,tar,gz,tgz,bz2,xz,7z,rar,jar,war,whl,egg}",
    "**/*.{exe,dll,so,dylib,a,o,obj,lib,class,pyc,pyo,wasm,bin,dat,db,sqlite}",
    "**/*.{woff,woff2,ttf,otf,eot,mp3,mp4,wav,ogg,avi,mov,webm}",
    // documentation, licensing and tool config
    "**/*.{md,rst,txt}",
    "**/{README,LICENSE,LICENCE,COPYING,NOTICE,AUTHORS,CHANGELOG,CHANGES,CONTRIBUTING}*",
    "**/{.pre-commit-config.yaml,.pre-commit-hooks.yaml,.gitignore,.gitattributes,.editorconfig}",
    // test, documentation and CI trees
    "**/{test,tests,doc,docs,.github,.gitlab,.circleci}/**",
    // package metadata
    "**/{package.json,package-lock.json,yarn.lock,pnpm-lock.yaml,Cargo.lock,go.sum}",
    "**/{pyproject.toml,setup.cfg,setup.py,poetry.lock,Pipfile,Pipfile.lock,uv.lock}",
    "**/*.{gemspec,lock}",
];

/// Fixed exclusion table applied to repository-discovered paths.
#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    excluded: GlobSet,
}

impl ExclusionPolicy {
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn new(patterns: &[&str]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|source| TodoGuardError::InvalidGlob {
                    pattern: (*pattern).to_string(),
                    source,
                })?;
            builder.add(glob);
        }
        let excluded = builder
            .build()
            .map_err(|source| TodoGuardError::InvalidGlob {
                pattern: "combined patterns".to_string(),
                source,
            })?;
        Ok(Self { excluded })
    }

    /// The built-in table.
    ///
    /// # Errors
    /// Only fails if the built-in table itself is malformed.
    pub fn standard() -> Result<Self> {
        Self::new(EXCLUDED_PATTERNS)
    }

    /// `path` is relative to the repository root, `/`-separated.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded.is_match(path)
    }
}

/// Enumerates tracked files for unstaged checking.
pub trait RepositoryFileLister {
    /// # Errors
    /// Returns an error if the repository cannot be read.
    fn list_files(&self) -> Result<Vec<PathBuf>>;
}

/// Lists tracked files from the git index.
///
/// Returned paths are relative to `start` when it lies inside the work tree,
/// so they compare equal to the paths a pre-commit hook hands us.
pub struct GitIndexLister {
    start: PathBuf,
    policy: ExclusionPolicy,
}

impl GitIndexLister {
    /// # Errors
    /// Returns an error if the exclusion table cannot be built.
    pub fn new(start: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::with_policy(start, ExclusionPolicy::standard()?))
    }

    #[must_use]
    pub fn with_policy(start: impl Into<PathBuf>, policy: ExclusionPolicy) -> Self {
        Self {
            start: start.into(),
            policy,
        }
    }
}

impl RepositoryFileLister for GitIndexLister {
    fn list_files(&self) -> Result<Vec<PathBuf>> {
        let repo = gix::discover(&self.start)
            .map_err(|e| TodoGuardError::Git(format!("Failed to discover git repository: {e}")))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| TodoGuardError::Git("Repository has no working directory".into()))?;
        let workdir = canonical(workdir);
        let start = canonical(&self.start);

        let index = repo
            .open_index()
            .map_err(|e| TodoGuardError::Git(format!("Failed to open git index: {e}")))?;

        // Conflicted entries appear once per stage.
        let mut files = IndexSet::new();
        for entry in index.entries() {
            if entry.mode == gix::index::entry::Mode::COMMIT {
                continue;
            }
            let relative = String::from_utf8_lossy(entry.path(&index)).into_owned();
            if self.policy.is_excluded(&relative) {
                continue;
            }
            files.insert(locate(&workdir, &start, &relative));
        }

        Ok(files.into_iter().collect())
    }
}

fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn locate(workdir: &Path, start: &Path, relative: &str) -> PathBuf {
    let absolute = workdir.join(relative);
    match absolute.strip_prefix(start) {
        Ok(stripped) => stripped.to_path_buf(),
        Err(_) => absolute,
    }
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
