//! # Test Utilities for lz
//!
//! ## TestWorkspace
//!
//! `TestWorkspace` is a temporary directory holding any number of git
//! repositories, each created with deterministic commit timestamps and an
//! isolated configuration. Everything is removed when the workspace drops.
//!
//! ## Environment Isolation
//!
//! Git and lz are run with isolated environments using `Command::env()`:
//! - No interference from global git config
//! - Commits dated [`COMMIT_EPOCH`], and lz's clock pinned two days later
//! - A fixed 80-column width and no colors
//! - Thread-safe execution (no global state mutation)
//!
//! ## Path Canonicalization
//!
//! The root is canonicalized to handle platform differences (especially macOS
//! symlinks like /var -> /private/var).

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

/// Commit time of every test commit, 2025-01-01T00:00:00Z
pub const COMMIT_EPOCH: i64 = 1_735_689_600;

/// The clock lz sees: two days after the commits, so ages read `2d`.
pub const NOW_EPOCH: i64 = COMMIT_EPOCH + 2 * 24 * 3600;

pub struct TestWorkspace {
    temp_dir: TempDir, // Must keep to ensure cleanup on drop
    root: PathBuf,
}

impl TestWorkspace {
    /// Create an empty workspace directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("workspace");
        std::fs::create_dir(&root).expect("Failed to create workspace directory");
        // Canonicalize to resolve symlinks (important on macOS where /var is symlink to /private/var)
        let root = root
            .canonicalize()
            .expect("Failed to canonicalize temp path");

        Self { temp_dir, root }
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// Directory outside the workspace, for repositories only reachable by path
    pub fn outside_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create `<root>/<name>` with one commit on `main` containing `README.md`.
    pub fn add_repo(&self, name: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create repo directory");

        self.git(&path, &["init", "-b", "main"]);
        self.git(&path, &["config", "user.name", "Test User"]);
        self.git(&path, &["config", "user.email", "test@example.com"]);

        std::fs::write(path.join("README.md"), "# readme\n").expect("Failed to write README");
        self.git(&path, &["add", "."]);
        self.git(&path, &["commit", "-m", "Initial commit"]);
        path
    }

    /// Write `contents` to `file` inside the repo at `repo`.
    pub fn write(&self, repo: &Path, file: &str, contents: &str) {
        std::fs::write(repo.join(file), contents)
            .unwrap_or_else(|_| panic!("Failed to write {}", file));
    }

    /// Run git in `dir` with the isolated environment, panicking on failure.
    pub fn git(&self, dir: &Path, args: &[&str]) {
        let mut cmd = Command::new("git");
        configure_git_cmd(&mut cmd);
        let output = cmd
            .args(args)
            .current_dir(dir)
            .output()
            .expect("Failed to execute git");

        if !output.status.success() {
            panic!(
                "git {} failed:\nstdout: {}\nstderr: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
    }

    /// `lz <args>` run from the workspace root with a clean environment.
    pub fn lz(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(get_cargo_bin("lz"));
        clean_cli_env(&mut cmd);
        cmd.args(args).current_dir(&self.root);
        cmd
    }

    /// Run `lz <args>` with `input` piped to stdin.
    pub fn lz_with_stdin(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .lz(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn lz");

        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        child.wait_with_output().expect("Failed to wait for lz")
    }
}

/// Configure a git command with isolated environment
///
/// This sets environment variables only for the specific command,
/// ensuring thread-safety and test isolation.
pub fn configure_git_cmd(cmd: &mut Command) {
    cmd.env("GIT_CONFIG_GLOBAL", "/dev/null");
    cmd.env("GIT_CONFIG_SYSTEM", "/dev/null");
    cmd.env("GIT_AUTHOR_DATE", "2025-01-01T00:00:00Z");
    cmd.env("GIT_COMMITTER_DATE", "2025-01-01T00:00:00Z");
    cmd.env("LC_ALL", "C");
    cmd.env("LANG", "C");
}

/// Clean environment for lz CLI commands
///
/// Removes potentially interfering environment variables and pins the
/// clock, width and color choice.
pub fn clean_cli_env(cmd: &mut Command) {
    for (key, _) in std::env::vars() {
        if key.starts_with("GIT_") || key.starts_with("LZ_") {
            cmd.env_remove(&key);
        }
    }
    configure_git_cmd(cmd);
    cmd.env_remove("CLICOLOR_FORCE");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd.env("COLUMNS", "80");
    cmd.env("LZ_TEST_EPOCH", NOW_EPOCH.to_string());
}

/// Stdout as text, after asserting the command succeeded.
pub fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "lz failed:\nstdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn dots(n: usize) -> String {
    "·".repeat(n)
}
