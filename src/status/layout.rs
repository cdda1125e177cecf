//! Column widths, dot leaders and truncation for the repository list
//!
//! Layout is two passes over the flattened rows. The first measures every
//! repository row and records the widest value per column; the second renders
//! each row against those widths. Both passes are pure: the same snapshot and
//! terminal width always produce the same text, and widths depend only on the
//! snapshot, so redrawing after a cursor move never shifts a column.
//!
//! ```text
//! ── api ·························· main          2d ↑2    @v1.0
//!    M src/lib.rs
//!    ? notes.md
//! ── web ·························· feature/login 3h ∅  ≡1
//! ```

use anstyle::Style;
use unicode_width::UnicodeWidthStr;

use super::rows::{FileLabel, Row, flatten};
use super::{Entry, Snapshot};
use crate::display::{ahead_marker, behind_marker, format_relative_time, stash_marker, tag_marker};
use crate::git::FileStatus;
use crate::styling::{DotLine, MIN_LEADER, StyledLine, Theme, truncate_path, truncate_to_width};

/// Rule drawn before every repository name
const RULE: &str = "── ";

/// `"   X "`: indent, status glyph, space
pub const FILE_PREFIX_WIDTH: usize = 5;

/// The list never gets narrower than this unless the terminal is
pub const MIN_PRIMARY_WIDTH: usize = 60;

/// Each side of a truncated rename keeps at least this many cells
const MIN_RENAME_HALF: usize = 8;

/// Repository names are never truncated below this many cells
const MIN_NAME_WIDTH: usize = 8;

/// Arrow between the old and new name of a rename
const RENAME_ARROW: &str = " → ";

/// Plain text of every right-hand column for one repository.
struct RepoColumns {
    branch: String,
    age: String,
    ahead: String,
    behind: String,
    stash: String,
    tag: String,
}

impl RepoColumns {
    fn new(entry: &Entry, now: i64) -> Self {
        let status = &entry.status;
        Self {
            branch: status.branch.clone(),
            age: format_relative_time(status.last_commit, now),
            ahead: ahead_marker(status.ahead, status.has_upstream),
            behind: behind_marker(status.behind),
            stash: stash_marker(status.stash_count),
            tag: tag_marker(&status.tag),
        }
    }
}

/// Widest value per column, in display cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    pub branch: usize,
    pub age: usize,
    pub ahead: usize,
    pub behind: usize,
    pub stash: usize,
    pub tag: usize,
}

impl ColumnWidths {
    fn observe(&mut self, columns: &RepoColumns) {
        self.branch = self.branch.max(columns.branch.width());
        self.age = self.age.max(columns.age.width());
        self.ahead = self.ahead.max(columns.ahead.width());
        self.behind = self.behind.max(columns.behind.width());
        self.stash = self.stash.max(columns.stash.width());
        self.tag = self.tag.max(columns.tag.width());
    }

    fn in_order(&self) -> [usize; 6] {
        [
            self.branch,
            self.age,
            self.ahead,
            self.behind,
            self.stash,
            self.tag,
        ]
    }

    /// Width of the right-hand block: non-empty columns joined by single spaces.
    pub fn right_width(&self) -> usize {
        let shown: Vec<usize> = self.in_order().into_iter().filter(|w| *w > 0).collect();
        shown.iter().sum::<usize>() + shown.len().saturating_sub(1)
    }
}

/// Measure every repository row of `rows`.
pub fn calculate_column_widths(snapshot: &Snapshot, rows: &[Row]) -> ColumnWidths {
    let mut widths = ColumnWidths::default();
    for row in rows {
        if let Row::Repo { entry } = *row {
            widths.observe(&RepoColumns::new(&snapshot.entries[entry], snapshot.taken_at));
        }
    }
    widths
}

fn label_width(path: &str) -> usize {
    match FileLabel::parse(path) {
        FileLabel::Path(path) => path.width(),
        FileLabel::Renamed { from, to } => from.width() + RENAME_ARROW.width() + to.width(),
    }
}

/// Widths plus the horizontal space rows are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    pub widths: ColumnWidths,
    /// Cells available to one row, excluding the cursor gutter
    pub available: usize,
    /// Reference time for relative ages
    pub now: i64,
}

impl LayoutConfig {
    /// Lay out `rows` for a terminal `terminal_width` cells wide, of which
    /// `gutter` cells are reserved for a cursor column.
    ///
    /// Rows use `min(terminal_width - gutter, max(60, natural))` cells, where
    /// `natural` is the widest row needing no truncation.
    pub fn calculate(
        snapshot: &Snapshot,
        rows: &[Row],
        terminal_width: usize,
        gutter: usize,
    ) -> Self {
        let widths = calculate_column_widths(snapshot, rows);
        let right = widths.right_width();

        let natural = rows
            .iter()
            .map(|row| match *row {
                Row::Repo { entry } => {
                    RULE.width() + snapshot.entries[entry].repo.name.width() + MIN_LEADER + right
                }
                Row::File { entry, file } => {
                    let path = &snapshot.entries[entry].status.files[file].path;
                    FILE_PREFIX_WIDTH + label_width(path)
                }
            })
            .max()
            .unwrap_or(0);

        let available = terminal_width
            .saturating_sub(gutter)
            .min(MIN_PRIMARY_WIDTH.max(natural));

        log::debug!(
            "Layout: width={terminal_width} gutter={gutter} natural={natural} available={available}"
        );

        Self {
            widths,
            available,
            now: snapshot.taken_at,
        }
    }

    pub fn render_row(&self, snapshot: &Snapshot, row: &Row, theme: &Theme) -> StyledLine {
        match *row {
            Row::Repo { entry } => self.render_repo(&snapshot.entries[entry], theme),
            Row::File { entry, file } => {
                self.render_file(&snapshot.entries[entry].status.files[file], theme)
            }
        }
    }

    fn right_block(&self, entry: &Entry, theme: &Theme) -> StyledLine {
        let columns = RepoColumns::new(entry, self.now);
        let widths = &self.widths;

        let branch_style = if entry.is_dirty() {
            theme.branch_dirty
        } else {
            theme.branch_clean
        };
        let ahead_style = if entry.status.has_upstream {
            theme.ahead
        } else {
            theme.no_upstream
        };

        let mut line = StyledLine::new();
        push_column(&mut line, &columns.branch, branch_style, widths.branch);
        push_column(&mut line, &columns.age, theme.age, widths.age);
        push_column(&mut line, &columns.ahead, ahead_style, widths.ahead);
        push_column(&mut line, &columns.behind, theme.behind, widths.behind);
        push_column(&mut line, &columns.stash, theme.stash, widths.stash);
        push_column(&mut line, &columns.tag, theme.tag, widths.tag);
        line
    }

    fn render_repo(&self, entry: &Entry, theme: &Theme) -> StyledLine {
        let right = self.right_block(entry, theme);

        // Shorten the name only when even the minimum leader does not fit
        let name_budget = self
            .available
            .saturating_sub(RULE.width() + MIN_LEADER + right.width())
            .max(MIN_NAME_WIDTH);
        let name = truncate_to_width(&entry.repo.name, name_budget);

        let mut label = StyledLine::new();
        label.push_styled(RULE.trim_end(), theme.rule);
        label.push_raw(" ");
        label.push_styled(name, theme.repo_name);

        DotLine::new(label, right).render(self.available, theme.leader)
    }

    fn render_file(&self, file: &FileStatus, theme: &Theme) -> StyledLine {
        let (glyph, style) = theme.file_sign(&file.code);
        let space = self.available.saturating_sub(FILE_PREFIX_WIDTH);

        let mut line = StyledLine::new();
        line.push_raw("   ");
        line.push_styled(glyph.to_string(), style);
        line.push_raw(" ");

        match FileLabel::parse(&file.path) {
            FileLabel::Path(path) => line.push_styled(truncate_path(path, space), style),
            FileLabel::Renamed { from, to } => {
                let (from, to) = fit_rename(from, to, space);
                line.push_styled(from, theme.rename_from);
                line.push_styled(RENAME_ARROW, style);
                line.push_styled(to, style);
            }
        }
        line
    }
}

/// Right-pad `text` to `width`, preceded by a single space unless it opens
/// the block. Columns of width 0 are omitted.
fn push_column(line: &mut StyledLine, text: &str, style: Style, width: usize) {
    if width == 0 {
        return;
    }
    if !line.segments.is_empty() {
        line.push_raw(" ");
    }
    if !text.is_empty() {
        line.push_styled(text, style);
    }
    let pad = width.saturating_sub(text.width());
    if pad > 0 {
        line.push_raw(" ".repeat(pad));
    }
}

/// Shrink both names of a rename, arrow included, into `space` cells.
/// The names share the space evenly; each keeps at least [`MIN_RENAME_HALF`]
/// cells.
fn fit_rename(from: &str, to: &str, space: usize) -> (String, String) {
    let names = space.saturating_sub(RENAME_ARROW.width());
    if from.width() + to.width() <= names {
        return (from.to_string(), to.to_string());
    }
    let half = (names / 2).max(MIN_RENAME_HALF);
    let from = truncate_path(from, half);
    let to = truncate_path(to, names.saturating_sub(from.width()).max(MIN_RENAME_HALF));
    (from, to)
}

/// Render a whole snapshot for non-interactive output.
///
/// A blank line separates consecutive repositories whenever either of them
/// has changes, so file lists stand apart from the clean one-liners.
pub fn render_print(snapshot: &Snapshot, terminal_width: usize, theme: &Theme) -> Vec<String> {
    let rows = flatten(&snapshot.entries);
    let layout = LayoutConfig::calculate(snapshot, &rows, terminal_width, 0);

    let mut lines = Vec::with_capacity(rows.len() + snapshot.entries.len());
    for row in &rows {
        let entry = row.entry();
        if !row.is_file()
            && entry > 0
            && (snapshot.entries[entry - 1].is_dirty() || snapshot.entries[entry].is_dirty())
        {
            lines.push(String::new());
        }
        lines.push(layout.render_row(snapshot, row, theme).render());
    }
    lines
}
