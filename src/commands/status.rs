//! `lz git`: discover, collect, then print or browse

use std::io::IsTerminal;

use lz::display::get_now;
use lz::git::{self, GitCli, GitError};
use lz::status::{collect_snapshot, render_print};
use lz::styling::{Theme, get_terminal_width, println};

use super::interactive;

pub fn handle_git(list: bool) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().map_err(|error| GitError::WorkingDirectory { error })?;
    let root = dunce::canonicalize(&cwd).unwrap_or(cwd);

    let repos = git::discover(&root)?;
    log::debug!("Found {} repositories under {}", repos.len(), root.display());
    if repos.is_empty() {
        println!("No git repos found.");
        return Ok(());
    }

    let source = GitCli::new();
    if !list && std::io::stdout().is_terminal() {
        return interactive::run(&repos, &source);
    }

    let snapshot = collect_snapshot(&repos, &source, get_now());
    // anstream strips the colors again when stdout does not support them
    for line in render_print(&snapshot, get_terminal_width(), &Theme::colored()) {
        println!("{line}");
    }
    Ok(())
}
