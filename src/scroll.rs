//! Scrollable viewport over a precomputed sequence of lines
//!
//! [`Scroll`] owns no lines; callers pass the full sequence to
//! [`Scroll::visible`] on every render, which refreshes the total and
//! re-clamps, so terminal resizes need no separate handling.
//!
//! Invariant after every operation: `0 <= offset <= max(total - height, 0)`.

/// Keys understood by every scrollable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollKey {
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scroll {
    /// First visible line
    pub offset: usize,
    /// Line count seen by the last [`Scroll::visible`] call
    pub total: usize,
    /// Viewport height in lines
    pub height: usize,
}

impl Scroll {
    pub fn new(height: usize) -> Self {
        Self {
            offset: 0,
            total: 0,
            height,
        }
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.height)
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn down(&mut self) {
        self.offset = (self.offset + 1).min(self.max_offset());
    }

    pub fn top(&mut self) {
        self.offset = 0;
    }

    pub fn bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn page_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.height.max(1));
    }

    pub fn page_down(&mut self) {
        self.offset = (self.offset + self.height.max(1)).min(self.max_offset());
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.clamp();
    }

    pub fn handle_key(&mut self, key: ScrollKey) {
        match key {
            ScrollKey::Up => self.up(),
            ScrollKey::Down => self.down(),
            ScrollKey::Top => self.top(),
            ScrollKey::Bottom => self.bottom(),
            ScrollKey::PageUp => self.page_up(),
            ScrollKey::PageDown => self.page_down(),
        }
    }

    /// The window of `lines` currently in view.
    pub fn visible<'a, T>(&mut self, lines: &'a [T]) -> &'a [T] {
        self.total = lines.len();
        self.clamp();
        let end = (self.offset + self.height).min(lines.len());
        &lines[self.offset..end]
    }

    /// Scroll position as `" · 42%"`, or empty when everything fits.
    pub fn percent(&self) -> String {
        let max = self.max_offset();
        if max == 0 {
            return String::new();
        }
        format!(" · {}%", 100 * self.offset / max)
    }
}

/// Smallest offset that shows `cursor` with one line of trailing context,
/// i.e. `cursor` within `[offset, offset + height - 2]`, clamped to
/// `[0, max(total - height, 0)]`.
///
/// A one-line window has no room for context and just shows the cursor.
pub fn keep_cursor_visible(cursor: usize, total: usize, height: usize) -> usize {
    if height == 0 || total <= height {
        return 0;
    }
    let offset = (cursor + 2).saturating_sub(height);
    offset.min(total - height).min(cursor)
}
