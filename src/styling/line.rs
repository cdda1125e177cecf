//! Styled line and string types for composable terminal output
//!
//! Provides types for building complex styled output with proper width calculation,
//! plus [`DotLine`], the "label ····· suffix" item shared by every list lz draws.

use anstyle::Style;
use unicode_width::UnicodeWidthStr;

use super::format::{ELLIPSIS, truncate_to_width};

/// Minimum number of cells between a label and its suffix, spaces included.
pub const MIN_LEADER: usize = 3;

/// Leader glyph repeated between the label and the suffix
pub const LEADER_CHAR: char = '·';

/// Strip ANSI escape codes (SGR and OSC) to get visual text for width calculation
fn strip_ansi_codes(text: &str) -> String {
    strip_ansi_escapes::strip_str(text)
}

/// A piece of text with an optional style
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledString {
    pub text: String,
    pub style: Option<Style>,
}

impl StyledString {
    pub fn new(text: impl Into<String>, style: Option<Style>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self::new(text, Some(style))
    }

    /// Returns the visual width (unicode-aware, ANSI codes stripped)
    pub fn width(&self) -> usize {
        let clean_text = strip_ansi_codes(&self.text);
        clean_text.width()
    }

    /// Renders to a string with ANSI escape codes
    pub fn render(&self) -> String {
        if let Some(style) = &self.style {
            format!("{}{}{}", style.render(), self.text, style.render_reset())
        } else {
            self.text.clone()
        }
    }
}

/// A line composed of multiple styled strings
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub segments: Vec<StyledString>,
}

impl StyledLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw (unstyled) segment
    pub fn push_raw(&mut self, text: impl Into<String>) {
        self.segments.push(StyledString::raw(text));
    }

    /// Add a styled segment
    pub fn push_styled(&mut self, text: impl Into<String>, style: Style) {
        self.segments.push(StyledString::styled(text, style));
    }

    /// Append every segment from another styled line.
    pub fn extend(&mut self, other: StyledLine) {
        self.segments.extend(other.segments);
    }

    /// Re-style every segment, e.g. to highlight the row under the cursor.
    pub fn restyle(mut self, style: Style) -> Self {
        for segment in &mut self.segments {
            segment.style = Some(style);
        }
        self
    }

    /// Returns the total visual width
    pub fn width(&self) -> usize {
        self.segments.iter().map(|s| s.width()).sum()
    }

    /// Cut the line to at most `max_width` cells, ending in `…` when anything
    /// was dropped. Each kept segment keeps its style.
    pub fn truncate(self, max_width: usize) -> Self {
        if self.width() <= max_width {
            return self;
        }

        let mut line = StyledLine::new();
        let mut remaining = max_width;
        for segment in self.segments {
            let width = segment.width();
            if width < remaining {
                remaining -= width;
                line.segments.push(segment);
                continue;
            }
            if remaining > 0 {
                // The ellipsis has to fit even when this segment fills the rest exactly
                let text = truncate_to_width(&format!("{}{ELLIPSIS}", segment.text), remaining);
                line.segments.push(StyledString::new(text, segment.style));
            }
            break;
        }
        line
    }

    /// Concatenated text without any styling
    pub fn plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Renders the entire line with ANSI escape codes
    pub fn render(&self) -> String {
        self.segments.iter().map(|s| s.render()).collect()
    }
}

/// Fill `gap` cells with a dot leader: `" ····· "`.
///
/// Gaps narrower than [`MIN_LEADER`] are widened to it.
pub fn leader_fill(gap: usize) -> String {
    let gap = gap.max(MIN_LEADER);
    let dots: String = std::iter::repeat_n(LEADER_CHAR, gap - 2).collect();
    format!(" {dots} ")
}

/// A list item made of a left label and a right-aligned suffix, joined by a
/// dot leader that absorbs the remaining width.
#[derive(Clone, Debug, Default)]
pub struct DotLine {
    pub label: StyledLine,
    pub suffix: StyledLine,
}

impl DotLine {
    pub fn new(label: StyledLine, suffix: StyledLine) -> Self {
        Self { label, suffix }
    }

    /// Lay the item out across `width` cells.
    ///
    /// The leader is `max(width - label - suffix, MIN_LEADER)` cells, so the
    /// result overflows `width` rather than dropping below the minimum leader.
    pub fn render(self, width: usize, leader_style: Style) -> StyledLine {
        let gap = width.saturating_sub(self.label.width() + self.suffix.width());
        let mut line = self.label;
        line.push_styled(leader_fill(gap), leader_style);
        line.extend(self.suffix);
        line
    }
}
