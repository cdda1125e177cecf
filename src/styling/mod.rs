//! Consolidated styling module for terminal output.
//!
//! This module uses the anstyle ecosystem:
//! - anstream for auto-detecting color support
//! - anstyle for composable styling, gathered into an injected [`Theme`]
//!
//! ## stdout vs stderr principle
//!
//! - **stdout**: the repository list (print mode) and the interactive screen
//! - **stderr**: errors, warnings and debug logs
//!
//! Rendering functions take a `&Theme` argument and never reach for global
//! style tables, so tests render with [`Theme::plain`] and compare plain text.

mod format;
mod line;
mod theme;

// Re-exports from anstream (auto-detecting output)
pub use anstream::{eprint, eprintln, print, println, stderr, stdout};

// Re-export our public types
pub use format::{
    ELLIPSIS, get_terminal_width, truncate_path, truncate_start, truncate_to_width, visual_width,
};
pub use line::{DotLine, LEADER_CHAR, MIN_LEADER, StyledLine, StyledString, leader_fill};
pub use theme::Theme;

/// Prefix for fatal error messages
pub const ERROR_EMOJI: &str = "❌";

/// Prefix for the follow-up hint under an error
pub const HINT_EMOJI: &str = "💡";
