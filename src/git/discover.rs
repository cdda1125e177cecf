//! Repository discovery
//!
//! Two sources, picked by [`discover`]:
//! - piped input: one `name<TAB>path` record per line
//! - otherwise: the directory itself and its immediate children

use std::io::BufRead;
use std::path::Path;

use super::{GitError, Repo};

/// Find repositories for `root`.
///
/// Reads `name<TAB>path` records from stdin when it is piped, otherwise scans
/// `root` and its immediate children for a `.git` directory.
pub fn discover(root: &Path) -> Result<Vec<Repo>, GitError> {
    if stdin_is_piped() {
        log::debug!("Reading repositories from stdin");
        discover_from_reader(root, std::io::stdin().lock())
    } else {
        discover_from_dir(root)
    }
}

/// Whether stdin is a pipe or file rather than a character device.
///
/// A terminal and `/dev/null` both count as "not piped", so a closed stdin
/// still scans the directory.
#[cfg(unix)]
fn stdin_is_piped() -> bool {
    use std::os::fd::AsFd;
    use std::os::unix::fs::FileTypeExt;

    std::io::stdin()
        .as_fd()
        .try_clone_to_owned()
        .map(std::fs::File::from)
        .and_then(|file| file.metadata())
        .map(|meta| !meta.file_type().is_char_device())
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn stdin_is_piped() -> bool {
    use std::io::IsTerminal;
    !std::io::stdin().is_terminal()
}

/// Parse `name<TAB>path` records. Relative paths are resolved against `root`;
/// malformed lines and paths without a `.git` directory are skipped.
pub fn discover_from_reader(root: &Path, reader: impl BufRead) -> Result<Vec<Repo>, GitError> {
    let mut repos = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|error| GitError::ReadInput { error })?;
        let Some((name, path)) = line.split_once('\t') else {
            log::debug!("Skipping record without a tab: {line:?}");
            continue;
        };

        let path = root.join(path);
        if is_git_dir(&path) {
            repos.push(Repo::new(name, path));
        } else {
            log::debug!("Skipping {}: not a git repository", path.display());
        }
    }
    Ok(repos)
}

/// Scan `root` and its immediate child directories, children in name order.
///
/// `root` itself is reported as `"."`.
pub fn discover_from_dir(root: &Path) -> Result<Vec<Repo>, GitError> {
    let mut repos = Vec::new();
    if is_git_dir(root) {
        repos.push(Repo::new(".", root));
    }

    let entries = std::fs::read_dir(root).map_err(|error| GitError::ReadDir {
        path: root.to_path_buf(),
        error,
    })?;

    let mut children: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    children.sort();

    for name in children {
        let child = root.join(&name);
        if is_git_dir(&child) {
            repos.push(Repo::new(name, child));
        }
    }
    Ok(repos)
}

fn is_git_dir(dir: &Path) -> bool {
    dir.join(".git").is_dir()
}
