//! `git` command-line backed implementation of [`StatusSource`].

use std::path::Path;
use std::process::Command;

use super::parse::{count_lines, parse_count, parse_porcelain, parse_timestamp};
use super::{DETACHED_HEAD, RepoStatus, StatusSource};
use crate::shell_exec;

/// Runs `git -C <repo> ...` for every query.
///
/// Failed commands yield empty output; callers map that to zero values so one
/// broken repository never aborts a collection pass.
#[derive(Debug, Clone, Default)]
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }

    /// Run git in `dir` and return stdout, or an empty string on any failure.
    fn output(&self, dir: &Path, args: &[&str]) -> String {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(dir).args(args);

        let context = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());

        match shell_exec::run(&mut cmd, Some(&context)) {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).into_owned()
            }
            Ok(output) => {
                log::debug!(
                    "  ! git {} failed in {}: {}",
                    args.join(" "),
                    dir.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                String::new()
            }
            Err(e) => {
                log::debug!("  ! git {} could not start: {}", args.join(" "), e);
                String::new()
            }
        }
    }

    fn line(&self, dir: &Path, args: &[&str]) -> String {
        self.output(dir, args).trim().to_string()
    }

    pub fn branch(&self, dir: &Path) -> String {
        let branch = self.line(dir, &["branch", "--show-current"]);
        if branch.is_empty() {
            DETACHED_HEAD.to_string()
        } else {
            branch
        }
    }

    pub fn latest_tag(&self, dir: &Path) -> String {
        self.line(dir, &["describe", "--tags", "--abbrev=0"])
    }

    pub fn has_upstream(&self, dir: &Path) -> bool {
        !self
            .line(dir, &["rev-parse", "--abbrev-ref", "@{upstream}"])
            .is_empty()
    }

    /// Commits on HEAD not on upstream, and the reverse.
    pub fn ahead_behind(&self, dir: &Path) -> (usize, usize) {
        let ahead = parse_count(&self.output(dir, &["rev-list", "--count", "@{upstream}..HEAD"]));
        let behind = parse_count(&self.output(dir, &["rev-list", "--count", "HEAD..@{upstream}"]));
        (ahead.unwrap_or(0), behind.unwrap_or(0))
    }

    pub fn stash_count(&self, dir: &Path) -> usize {
        count_lines(&self.output(dir, &["stash", "list"]))
    }

    pub fn last_commit(&self, dir: &Path) -> Option<i64> {
        parse_timestamp(&self.output(dir, &["log", "-1", "--format=%ct"]))
    }
}

impl StatusSource for GitCli {
    fn status(&self, path: &Path) -> RepoStatus {
        let has_upstream = self.has_upstream(path);
        let (ahead, behind) = if has_upstream {
            self.ahead_behind(path)
        } else {
            (0, 0)
        };

        RepoStatus {
            branch: self.branch(path),
            tag: self.latest_tag(path),
            ahead,
            behind,
            stash_count: self.stash_count(path),
            has_upstream,
            last_commit: self.last_commit(path),
            ..RepoStatus::default()
        }
        .with_files(parse_porcelain(&self.output(path, &["status", "--porcelain", "-z"])))
    }

    fn diff(&self, path: &Path, file: &str, code: &str) -> String {
        match diff_args(code) {
            DiffArgs::Untracked => {
                // `--no-index` exits 1 when the files differ, which is always the
                // case against /dev/null, so read stdout regardless of status.
                let mut cmd = Command::new("git");
                cmd.arg("-C")
                    .arg(path)
                    .args(["diff", "--no-color", "--no-index", "--", "/dev/null", file]);
                match shell_exec::run(&mut cmd, None) {
                    Ok(output) => String::from_utf8_lossy(&output.stdout).into_owned(),
                    Err(e) => {
                        log::debug!("  ! git diff --no-index could not start: {}", e);
                        String::new()
                    }
                }
            }
            DiffArgs::Staged => self.output(path, &["diff", "--no-color", "--cached", "--", file]),
            DiffArgs::WorkingTree => self.output(path, &["diff", "--no-color", "--", file]),
        }
    }
}

/// Which diff source a porcelain code maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiffArgs {
    /// New file, diffed against an empty baseline
    Untracked,
    /// Index column has a letter: diff the index against HEAD
    Staged,
    /// Unstaged working tree change
    WorkingTree,
}

fn diff_args(code: &str) -> DiffArgs {
    if code == "??" {
        DiffArgs::Untracked
    } else if !code.starts_with(' ') {
        DiffArgs::Staged
    } else {
        DiffArgs::WorkingTree
    }
}
