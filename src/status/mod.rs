//! Multi-repository status: collection, flattening, layout and the
//! interactive view model.
//!
//! Data flows one way:
//!
//! ```text
//! Vec<Repo> ─collect─▶ Snapshot ─flatten─▶ Vec<Row> ─layout─▶ lines
//!                                              ▲
//!                                    view::Model (cursor, state)
//! ```
//!
//! A [`Snapshot`] is immutable once built; a new collection pass replaces it
//! wholesale.

pub mod collect;
pub mod layout;
pub mod rows;
pub mod view;

pub use collect::{collect_entries, collect_snapshot, sort_entries};
pub use layout::{ColumnWidths, LayoutConfig, calculate_column_widths, render_print};
pub use rows::{FileLabel, Row, flatten};

use crate::git::{FileStatus, Repo, RepoStatus};

/// A repository together with the status captured for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub repo: Repo,
    pub status: RepoStatus,
}

impl Entry {
    pub fn new(repo: Repo, status: RepoStatus) -> Self {
        Self { repo, status }
    }

    pub fn is_dirty(&self) -> bool {
        !self.status.is_clean
    }

    pub fn file(&self, index: usize) -> Option<&FileStatus> {
        self.status.files.get(index)
    }
}

/// Entries from one collection pass, stamped with the time it ran.
///
/// Relative ages are computed against `taken_at`, so rendering a snapshot is
/// a pure function of its contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub entries: Vec<Entry>,
    /// Unix seconds
    pub taken_at: i64,
}

impl Snapshot {
    pub fn new(entries: Vec<Entry>, taken_at: i64) -> Self {
        Self { entries, taken_at }
    }

    pub fn dirty_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_dirty()).count()
    }
}
