//! Discovery error types and formatting
//!
//! Only discovery failures cross the core boundary. Everything that goes wrong
//! while fetching a single repository's status degrades to a zero value
//! instead (see [`super::GitCli`]).
//!
//! `GitError` is a typed enum so callers and tests can pattern-match on it.
//! Display produces styled output with emoji and colors.

use std::path::PathBuf;

use color_print::cwrite;

use crate::styling::{ERROR_EMOJI, HINT_EMOJI};

/// Fatal errors raised while discovering repositories.
///
/// # Usage
///
/// ```ignore
/// let repos = discover(&cwd).map_err(|e| {
///     if let GitError::ReadDir { path, .. } = &e {
///         log::debug!("cannot scan {}", path.display());
///     }
///     e
/// })?;
/// ```
#[derive(Debug)]
pub enum GitError {
    /// The process working directory could not be resolved.
    WorkingDirectory { error: std::io::Error },
    /// The directory to scan could not be listed.
    ReadDir {
        path: PathBuf,
        error: std::io::Error,
    },
    /// Piped `name<TAB>path` records could not be read.
    ReadInput { error: std::io::Error },
}

impl std::error::Error for GitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GitError::WorkingDirectory { error }
            | GitError::ReadDir { error, .. }
            | GitError::ReadInput { error } => Some(error),
        }
    }
}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::WorkingDirectory { error } => {
                cwrite!(
                    f,
                    "{ERROR_EMOJI} <red>Cannot resolve the working directory: {error}</>"
                )
            }

            GitError::ReadDir { path, error } => {
                let path = path.display();
                cwrite!(
                    f,
                    "{ERROR_EMOJI} <red>Cannot read <bold>{path}</>: {error}</>"
                )
            }

            GitError::ReadInput { error } => {
                cwrite!(
                    f,
                    "{ERROR_EMOJI} <red>Cannot read repositories from stdin: {error}</>\n\n{HINT_EMOJI} <dim>Pipe one record per line: a name, a tab, then the repository path</>"
                )
            }
        }
    }
}

impl GitError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
