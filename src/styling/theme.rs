//! Color theme passed explicitly to every rendering function
//!
//! Rendering never reads process-wide style tables; callers pick a theme once
//! ([`Theme::colored`] for terminals, [`Theme::plain`] for tests and pipes) and
//! hand it down.

use anstyle::{AnsiColor, Color, Style};

fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// `── ` before a repository name
    pub rule: Style,
    pub repo_name: Style,
    /// Dot leader between label and suffix
    pub leader: Style,
    /// Branch of a repository with changes
    pub branch_dirty: Style,
    pub branch_clean: Style,
    pub age: Style,
    pub ahead: Style,
    /// `∅` marker for a branch without upstream
    pub no_upstream: Style,
    pub behind: Style,
    pub stash: Style,
    pub tag: Style,

    // Changed files, by porcelain code
    pub file_untracked: Style,
    pub file_staged: Style,
    pub file_unstaged: Style,
    pub file_mixed: Style,
    pub file_deleted: Style,
    pub file_other: Style,
    /// Old name of a rename
    pub rename_from: Style,

    // Interactive chrome
    pub cursor: Style,
    pub title: Style,
    pub help: Style,
    pub message: Style,

    // Diff body
    pub diff_added: Style,
    pub diff_removed: Style,
    pub diff_hunk: Style,
    pub diff_meta: Style,
}

impl Theme {
    /// ANSI colors for terminal output.
    pub fn colored() -> Self {
        let faint = Style::new().dimmed();
        Self {
            rule: faint,
            repo_name: Style::new().bold(),
            leader: faint,
            branch_dirty: fg(AnsiColor::Cyan),
            branch_clean: Style::new(),
            age: faint,
            ahead: fg(AnsiColor::Green),
            no_upstream: faint,
            behind: fg(AnsiColor::Red),
            stash: Style::new(),
            tag: fg(AnsiColor::Yellow),

            file_untracked: fg(AnsiColor::Red),
            file_staged: fg(AnsiColor::Green),
            file_unstaged: fg(AnsiColor::Yellow),
            file_mixed: fg(AnsiColor::Cyan),
            file_deleted: fg(AnsiColor::Red),
            file_other: faint,
            rename_from: faint,

            cursor: fg(AnsiColor::Magenta).bold(),
            title: fg(AnsiColor::Blue).bold(),
            help: faint,
            message: fg(AnsiColor::Yellow),

            diff_added: fg(AnsiColor::Green),
            diff_removed: fg(AnsiColor::Red),
            diff_hunk: fg(AnsiColor::Cyan),
            diff_meta: Style::new().bold(),
        }
    }

    /// No styling at all; rendered output is plain text.
    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            rule: none,
            repo_name: none,
            leader: none,
            branch_dirty: none,
            branch_clean: none,
            age: none,
            ahead: none,
            no_upstream: none,
            behind: none,
            stash: none,
            tag: none,
            file_untracked: none,
            file_staged: none,
            file_unstaged: none,
            file_mixed: none,
            file_deleted: none,
            file_other: none,
            rename_from: none,
            cursor: none,
            title: none,
            help: none,
            message: none,
            diff_added: none,
            diff_removed: none,
            diff_hunk: none,
            diff_meta: none,
        }
    }

    /// Glyph and style for a porcelain status code.
    pub fn file_sign(&self, code: &str) -> (char, Style) {
        match code {
            "??" => ('?', self.file_untracked),
            "M " => ('M', self.file_staged),
            " M" => ('M', self.file_unstaged),
            "MM" => ('M', self.file_mixed),
            "A " => ('A', self.file_staged),
            "AM" => ('A', self.file_mixed),
            " D" | "D " => ('D', self.file_deleted),
            "R " => ('R', self.file_staged),
            _ => ('~', self.file_other),
        }
    }

    /// Style for one line of unified diff output.
    pub fn diff_line(&self, line: &str) -> Style {
        if line.starts_with("+++") || line.starts_with("---") || line.starts_with("diff ") {
            self.diff_meta
        } else if line.starts_with('+') {
            self.diff_added
        } else if line.starts_with('-') {
            self.diff_removed
        } else if line.starts_with("@@") {
            self.diff_hunk
        } else {
            Style::new()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}
