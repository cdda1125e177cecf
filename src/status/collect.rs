//! Parallel status collection
//!
//! One rayon task per repository, joined before anything is rendered. Sorting
//! happens after the join, so the final order never depends on which task
//! finished first.

use rayon::prelude::*;

use super::{Entry, Snapshot};
use crate::git::{Repo, StatusSource};

/// Fetch the status of every repository in parallel.
///
/// Blocks until all fetches finish. The result is in input order:
/// `entries[i].repo == repos[i]`.
pub fn collect_entries(repos: &[Repo], source: &impl StatusSource) -> Vec<Entry> {
    log::debug!("Collecting status for {} repositories", repos.len());
    repos
        .par_iter()
        .map(|repo| Entry::new(repo.clone(), source.status(&repo.path)))
        .collect()
}

/// Order entries for display: repositories with changes first, then by name.
///
/// The sort is stable, so entries with equal names keep their discovery order.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        a.status
            .is_clean
            .cmp(&b.status.is_clean)
            .then_with(|| a.repo.name.cmp(&b.repo.name))
    });
}

/// Collect, sort and stamp one snapshot.
pub fn collect_snapshot(repos: &[Repo], source: &impl StatusSource, now: i64) -> Snapshot {
    let mut entries = collect_entries(repos, source);
    sort_entries(&mut entries);
    let snapshot = Snapshot::new(entries, now);
    log::debug!(
        "{} of {} repositories have changes",
        snapshot.dirty_count(),
        snapshot.entries.len()
    );
    snapshot
}
