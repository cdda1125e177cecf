//! Interactive list and diff view as a state machine
//!
//! [`Model::update`] consumes one [`Event`] and returns the [`Effect`] the
//! driver must perform. Anything that blocks (loading a diff, running the
//! editor, collecting a new snapshot) happens outside the model and comes
//! back as another event, so the model itself never does I/O:
//!
//! ```text
//! Select ─▶ Effect::LoadDiff    ─driver─▶ Event::DiffLoaded
//! Edit   ─▶ Effect::OpenEditor  ─driver─▶ Event::EditorExited ─▶ Effect::Recollect
//!                                                 driver ─▶ Event::Refreshed
//! ```

use std::path::PathBuf;

use unicode_width::UnicodeWidthStr;

use super::layout::LayoutConfig;
use super::rows::{FileLabel, Row, flatten};
use super::Snapshot;
use crate::scroll::{Scroll, ScrollKey, keep_cursor_visible};
use crate::styling::{DotLine, StyledLine, Theme, truncate_to_width};

/// Cells reserved left of every list row for the cursor marker
pub const CURSOR_GUTTER: usize = 2;

/// Cursor marker, [`CURSOR_GUTTER`] cells wide
const CURSOR_MARKER: &str = "▸ ";

/// Shown in place of an empty diff
pub const NO_DIFF: &str = "(no diff)";

/// Tabs in diff text are expanded to this
const TAB: &str = "    ";

/// Rule under the detail header is at most this wide
const RULE_WIDTH: usize = 60;

/// Lines of chrome around the list body: blank line and help bar
const LIST_CHROME: usize = 2;

/// Lines of chrome around the diff body: header, rule and help bar
const DETAIL_CHROME: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,
    Select,
    Back,
    Edit,
    Quit,
    Resize {
        width: usize,
        height: usize,
    },
    /// Diff text for the file row that was selected
    DiffLoaded {
        entry: usize,
        file: usize,
        text: String,
    },
    EditorExited {
        success: bool,
    },
    Refreshed(Snapshot),
}

/// Work the driver performs on behalf of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    LoadDiff {
        entry: usize,
        file: usize,
        repo: PathBuf,
        path: String,
        code: String,
    },
    /// Run the editor on `target` from inside `dir`, then send
    /// [`Event::EditorExited`].
    OpenEditor {
        dir: PathBuf,
        target: PathBuf,
    },
    Recollect,
    Quit,
}

/// The diff of one file, scrolled independently of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub entry: usize,
    pub file: usize,
    pub title: String,
    pub lines: Vec<String>,
    pub scroll: Scroll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    List,
    Detail(Detail),
}

#[derive(Debug, Clone)]
pub struct Model {
    snapshot: Snapshot,
    rows: Vec<Row>,
    cursor: usize,
    state: State,
    width: usize,
    height: usize,
    /// Transient notice shown in the help bar until the next key
    message: Option<String>,
}

impl Model {
    pub fn new(snapshot: Snapshot, width: usize, height: usize) -> Self {
        let rows = flatten(&snapshot.entries);
        Self {
            snapshot,
            rows,
            cursor: 0,
            state: State::List,
            width,
            height,
            message: None,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn list_height(&self) -> usize {
        self.height.saturating_sub(LIST_CHROME)
    }

    fn detail_height(&self) -> usize {
        self.height.saturating_sub(DETAIL_CHROME)
    }

    pub fn update(&mut self, event: Event) -> Effect {
        if is_key(&event) {
            self.message = None;
        }

        match event {
            Event::Quit => Effect::Quit,
            Event::Resize { width, height } => {
                self.width = width;
                self.height = height;
                let detail_height = self.detail_height();
                if let State::Detail(detail) = &mut self.state {
                    detail.scroll.set_height(detail_height);
                }
                Effect::None
            }
            Event::DiffLoaded { entry, file, text } => {
                self.enter_detail(entry, file, text);
                Effect::None
            }
            Event::EditorExited { success } => {
                if !success {
                    self.message = Some("Editor exited with an error".to_string());
                }
                self.state = State::List;
                Effect::Recollect
            }
            Event::Refreshed(snapshot) => {
                self.refresh(snapshot);
                Effect::None
            }
            Event::Edit => self.edit(),
            key => match self.state {
                State::List => self.update_list(key),
                State::Detail(_) => self.update_detail(key),
            },
        }
    }

    fn update_list(&mut self, event: Event) -> Effect {
        let count = self.rows.len();
        if count == 0 {
            return Effect::None;
        }
        let last = count - 1;
        let page = self.list_height().max(1);

        match event {
            Event::Up => self.cursor = if self.cursor == 0 { last } else { self.cursor - 1 },
            Event::Down => self.cursor = if self.cursor >= last { 0 } else { self.cursor + 1 },
            Event::Top => self.cursor = 0,
            Event::Bottom => self.cursor = last,
            Event::PageUp => self.cursor = self.cursor.saturating_sub(page),
            Event::PageDown => self.cursor = (self.cursor + page).min(last),
            Event::Select => return self.select(),
            _ => {}
        }
        Effect::None
    }

    fn update_detail(&mut self, event: Event) -> Effect {
        let State::Detail(detail) = &mut self.state else {
            return Effect::None;
        };
        let key = match event {
            Event::Up => ScrollKey::Up,
            Event::Down => ScrollKey::Down,
            Event::Top => ScrollKey::Top,
            Event::Bottom => ScrollKey::Bottom,
            Event::PageUp => ScrollKey::PageUp,
            Event::PageDown => ScrollKey::PageDown,
            Event::Back => {
                self.state = State::List;
                return Effect::None;
            }
            _ => return Effect::None,
        };
        detail.scroll.handle_key(key);
        Effect::None
    }

    fn select(&self) -> Effect {
        let Some(Row::File { entry, file }) = self.rows.get(self.cursor).copied() else {
            return Effect::None;
        };
        let item = &self.snapshot.entries[entry];
        let Some(status) = item.file(file) else {
            return Effect::None;
        };
        Effect::LoadDiff {
            entry,
            file,
            repo: item.repo.path.clone(),
            path: FileLabel::parse(&status.path).target().to_string(),
            code: status.code.clone(),
        }
    }

    fn enter_detail(&mut self, entry: usize, file: usize, text: String) {
        let Some(status) = self.snapshot.entries.get(entry).and_then(|e| e.file(file)) else {
            log::debug!("Ignoring diff for a row that no longer exists");
            return;
        };
        let title = FileLabel::parse(&status.path).display();

        let lines: Vec<String> = if text.trim().is_empty() {
            vec![NO_DIFF.to_string()]
        } else {
            text.lines().map(|line| line.replace('\t', TAB)).collect()
        };

        let mut scroll = Scroll::new(self.detail_height());
        scroll.visible(&lines);

        self.state = State::Detail(Detail {
            entry,
            file,
            title,
            lines,
            scroll,
        });
    }

    /// The editor opens the file under the cursor (or the diffed file), or the
    /// repository directory on a repository row.
    fn edit(&self) -> Effect {
        let (entry, file) = match &self.state {
            State::Detail(detail) => (detail.entry, Some(detail.file)),
            State::List => match self.rows.get(self.cursor) {
                Some(row) => (row.entry(), row.file()),
                None => return Effect::None,
            },
        };
        let Some(item) = self.snapshot.entries.get(entry) else {
            return Effect::None;
        };

        let dir = item.repo.path.clone();
        let target = match file.and_then(|f| item.file(f)) {
            Some(status) => dir.join(FileLabel::parse(&status.path).target()),
            None => dir.clone(),
        };
        Effect::OpenEditor { dir, target }
    }

    /// Swap in a new snapshot, keeping the cursor's index where possible.
    fn refresh(&mut self, snapshot: Snapshot) {
        self.rows = flatten(&snapshot.entries);
        self.snapshot = snapshot;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        self.state = State::List;
    }
}

fn is_key(event: &Event) -> bool {
    !matches!(
        event,
        Event::Resize { .. }
            | Event::DiffLoaded { .. }
            | Event::EditorExited { .. }
            | Event::Refreshed(_)
    )
}

fn help_bar(parts: &[&str], width: usize, theme: &Theme) -> String {
    let mut line = StyledLine::new();
    line.push_styled(parts.join(" · "), theme.help);
    line.truncate(width).render()
}

fn message_bar(model: &Model, theme: &Theme, parts: &[&str]) -> String {
    match model.message() {
        Some(message) => {
            let mut line = StyledLine::new();
            line.push_styled(message, theme.message);
            line.truncate(model.width).render()
        }
        None => help_bar(parts, model.width, theme),
    }
}

/// Screen contents for the current state, one string per terminal line.
///
/// No line is wider than the model's width, so the terminal never wraps one.
pub fn render(model: &Model, theme: &Theme) -> Vec<String> {
    match &model.state {
        State::List => render_list(model, theme),
        State::Detail(detail) => render_detail(model, detail, theme),
    }
}

fn render_list(model: &Model, theme: &Theme) -> Vec<String> {
    let layout =
        LayoutConfig::calculate(&model.snapshot, &model.rows, model.width, CURSOR_GUTTER);
    let height = model.list_height();
    let offset = keep_cursor_visible(model.cursor, model.rows.len(), height);
    let end = (offset + height).min(model.rows.len());

    let mut lines = Vec::with_capacity(height + LIST_CHROME);
    for (index, row) in model.rows[offset..end].iter().enumerate() {
        let line = layout.render_row(&model.snapshot, row, theme);
        let mut framed = StyledLine::new();
        if offset + index == model.cursor {
            framed.push_styled(CURSOR_MARKER, theme.cursor);
            framed.extend(line.restyle(theme.cursor));
        } else {
            framed.push_raw(" ".repeat(CURSOR_GUTTER));
            framed.extend(line);
        }
        lines.push(framed.truncate(model.width).render());
    }

    lines.push(String::new());
    lines.push(message_bar(
        model,
        theme,
        &["↑/↓ navigate", "→ open", "e edit", "q quit"],
    ));
    lines
}

fn render_detail(model: &Model, detail: &Detail, theme: &Theme) -> Vec<String> {
    let width = model.width.max(1);
    let repo = model
        .snapshot
        .entries
        .get(detail.entry)
        .map(|e| e.repo.name.as_str())
        .unwrap_or_default();

    // "← title ········ repo", the title giving way first
    let mut suffix = StyledLine::new();
    suffix.push_styled(repo, theme.age);
    let title_budget = width.saturating_sub(2 + 3 + repo.width() + 1).max(1);
    let mut label = StyledLine::new();
    label.push_styled(
        format!("← {}", truncate_to_width(&detail.title, title_budget)),
        theme.title,
    );
    let header = DotLine::new(label, suffix).render(width.saturating_sub(1), theme.leader);

    let mut lines = vec![
        header.truncate(width).render(),
        "─".repeat(width.min(RULE_WIDTH)),
    ];

    let mut scroll = detail.scroll;
    for text in scroll.visible(&detail.lines) {
        let mut line = StyledLine::new();
        line.push_styled(truncate_to_width(text, width), theme.diff_line(text));
        lines.push(line.render());
    }

    let back = format!("← back{}", scroll.percent());
    lines.push(message_bar(
        model,
        theme,
        &["↑/↓ scroll", "g/G top/bottom", "e edit", back.as_str()],
    ));
    lines
}
