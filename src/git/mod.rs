//! Git repositories, their status, and the collaborators that produce them

use std::path::{Path, PathBuf};

// Submodules
mod cli;
mod discover;
mod error;
mod parse;

// Re-exports from submodules
pub use cli::GitCli;
pub use discover::{discover, discover_from_dir, discover_from_reader};
pub use error::GitError;
pub use parse::{count_lines, parse_porcelain};

/// Branch name shown when HEAD is detached or the branch cannot be read.
pub const DETACHED_HEAD: &str = "HEAD";

/// A named git repository, as produced by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    pub name: String,
    pub path: PathBuf,
}

impl Repo {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A single `git status --porcelain` entry.
///
/// Renames keep git's `old -> new` form in `path`; see
/// `status::rows::FileLabel` for how they are split for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Two-character porcelain code (`"??"`, `" M"`, `"R "`, ...)
    pub code: String,
    pub path: String,
}

impl FileStatus {
    pub fn new(code: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            path: path.into(),
        }
    }
}

/// Parsed git state for one repository, captured in a single collection pass.
///
/// Every field has a zero value that stands in when its git command fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoStatus {
    pub branch: String,
    pub tag: String,
    pub ahead: usize,
    pub behind: usize,
    pub stash_count: usize,
    pub has_upstream: bool,
    /// Unix timestamp of the last commit
    pub last_commit: Option<i64>,
    pub files: Vec<FileStatus>,
    pub is_clean: bool,
}

impl Default for RepoStatus {
    fn default() -> Self {
        Self {
            branch: DETACHED_HEAD.to_string(),
            tag: String::new(),
            ahead: 0,
            behind: 0,
            stash_count: 0,
            has_upstream: false,
            last_commit: None,
            files: Vec::new(),
            is_clean: true,
        }
    }
}

impl RepoStatus {
    /// Attach the changed files, keeping `is_clean` consistent with them.
    pub fn with_files(mut self, files: Vec<FileStatus>) -> Self {
        self.is_clean = files.is_empty();
        self.files = files;
        self
    }
}

/// Source of repository status and per-file diffs.
///
/// [`GitCli`] is the real implementation. The collector and the view only see
/// this trait, so tests can substitute canned data.
pub trait StatusSource: Sync {
    /// Fetch the full status of the repository at `path`. Never fails: fields
    /// that cannot be read take their zero value.
    fn status(&self, path: &Path) -> RepoStatus;

    /// Unified diff text for one file, chosen by its porcelain code. Empty when
    /// nothing could be produced.
    fn diff(&self, path: &Path, file: &str, code: &str) -> String;
}

impl<T: StatusSource + ?Sized> StatusSource for &T {
    fn status(&self, path: &Path) -> RepoStatus {
        (**self).status(path)
    }

    fn diff(&self, path: &Path, file: &str, code: &str) -> String {
        (**self).diff(path, file, code)
    }
}
