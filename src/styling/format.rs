//! Width measurement and truncation
//!
//! All widths are terminal display cells (`unicode-width`), never bytes or
//! chars, and ignore ANSI escape codes.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Default terminal width fallback if detection fails
const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Marker inserted where text was removed
pub const ELLIPSIS: char = '…';

/// Strip ANSI escape codes from a string using strip-ansi-escapes
fn strip_ansi_codes(s: &str) -> String {
    strip_ansi_escapes::strip_str(s)
}

/// Calculate visual width of a string, ignoring ANSI escape codes
pub fn visual_width(s: &str) -> usize {
    strip_ansi_codes(s).width()
}

/// Get terminal width, defaulting to 80 if detection fails
///
/// Checks COLUMNS environment variable first (for testing and scripts),
/// then falls back to actual terminal size detection.
pub fn get_terminal_width() -> usize {
    // Check COLUMNS environment variable first (for testing and scripts)
    if let Ok(cols) = std::env::var("COLUMNS")
        && let Ok(width) = cols.parse::<usize>()
    {
        return width;
    }

    // Fall back to actual terminal size
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}

/// Truncate text with ellipsis at exact width limit, keeping the start.
///
/// Truncates at character boundary (mid-word if needed) to fill the allocated
/// width exactly.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }

    // Build up string until we hit the width limit (accounting for "…" = 1 width)
    let target_width = max_width - 1;
    let mut current_width = 0;
    let mut last_idx = 0;

    for (idx, ch) in text.char_indices() {
        let char_width = ch.width().unwrap_or(0);
        if current_width + char_width > target_width {
            break;
        }
        current_width += char_width;
        last_idx = idx + ch.len_utf8();
    }

    format!("{}{ELLIPSIS}", &text[..last_idx])
}

/// Truncate text with a leading ellipsis, keeping the end.
pub fn truncate_start(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }

    let target_width = max_width - 1;
    let mut current_width = 0;
    let mut first_idx = text.len();

    for (idx, ch) in text.char_indices().rev() {
        let char_width = ch.width().unwrap_or(0);
        if current_width + char_width > target_width {
            break;
        }
        current_width += char_width;
        first_idx = idx;
    }

    format!("{ELLIPSIS}{}", &text[first_idx..])
}

/// Shorten a slash-separated path to `max_width` cells with a single ellipsis.
///
/// The last segment (the file name) is kept whole whenever it fits; the
/// ellipsis then replaces the end of the directory part: `src/comm…/main.rs`.
/// A file name too wide on its own keeps its tail: `…ong-name.rs`.
pub fn truncate_path(path: &str, max_width: usize) -> String {
    if path.width() <= max_width {
        return path.to_string();
    }

    let Some(slash) = path.rfind('/') else {
        return truncate_start(path, max_width);
    };
    let (dir, name) = path.split_at(slash); // `name` keeps its leading '/'

    let name_width = name.width();
    if name_width + 1 > max_width {
        return truncate_start(path, max_width);
    }

    // Room for the directory prefix once the ellipsis and name are placed
    let dir_budget = max_width - name_width;
    let mut kept = truncate_to_width(dir, dir_budget);
    if !kept.ends_with(ELLIPSIS) {
        // `dir` fit entirely, which means `path` did too
        kept.push(ELLIPSIS);
    }
    format!("{kept}{name}")
}
