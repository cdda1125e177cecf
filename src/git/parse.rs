//! Parsers for git command output

use super::FileStatus;

/// Parse `git status --porcelain -z` (v1) output into file entries.
///
/// Records are NUL-terminated `XY path` with paths never quoted. A rename or
/// copy is followed by one more field holding the old path; the pair is
/// rejoined as `old -> new`. Records too short to hold a code, a space and a
/// path are skipped.
pub fn parse_porcelain(output: &str) -> Vec<FileStatus> {
    let mut fields = output.split('\0');
    let mut files = Vec::new();

    while let Some(record) = fields.next() {
        if record.len() < 4 || !record.is_char_boundary(2) || !record.is_char_boundary(3) {
            continue;
        }
        let (code, path) = (&record[..2], &record[3..]);

        if code.contains(['R', 'C']) {
            match fields.next() {
                Some(from) if !from.is_empty() => {
                    files.push(FileStatus::new(code, format!("{from} -> {path}")));
                }
                _ => files.push(FileStatus::new(code, path)),
            }
        } else {
            files.push(FileStatus::new(code, path));
        }
    }
    files
}

/// Count non-empty lines, e.g. entries of `git stash list`.
pub fn count_lines(output: &str) -> usize {
    output.lines().filter(|line| !line.trim().is_empty()).count()
}

/// Parse a single integer line such as `git rev-list --count` output.
pub(crate) fn parse_count(output: &str) -> Option<usize> {
    output.trim().parse().ok()
}

/// Parse a unix timestamp line such as `git log -1 --format=%ct` output.
pub(crate) fn parse_timestamp(output: &str) -> Option<i64> {
    output.trim().parse().ok()
}
