//! Flattening the repository → file hierarchy into one navigable list

use super::Entry;

/// Separator git uses between the old and new name of a rename
const RENAME_SEPARATOR: &str = " -> ";

/// One line of the list: a repository or one of its changed files.
///
/// Rows hold indices into the snapshot and are rebuilt whenever it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Repo { entry: usize },
    File { entry: usize, file: usize },
}

impl Row {
    pub fn entry(&self) -> usize {
        match *self {
            Row::Repo { entry } | Row::File { entry, .. } => entry,
        }
    }

    /// Index of the file within its entry, for file rows.
    pub fn file(&self) -> Option<usize> {
        match *self {
            Row::Repo { .. } => None,
            Row::File { file, .. } => Some(file),
        }
    }

    pub fn is_file(&self) -> bool {
        self.file().is_some()
    }
}

/// One repository row per entry, followed by a row per changed file when the
/// repository is dirty.
pub fn flatten(entries: &[Entry]) -> Vec<Row> {
    let mut rows = Vec::new();
    for (entry, item) in entries.iter().enumerate() {
        rows.push(Row::Repo { entry });
        if item.status.is_clean {
            continue;
        }
        rows.extend((0..item.status.files.len()).map(|file| Row::File { entry, file }));
    }
    rows
}

/// A porcelain path, with renames split into their two names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLabel<'a> {
    Path(&'a str),
    Renamed { from: &'a str, to: &'a str },
}

impl<'a> FileLabel<'a> {
    pub fn parse(path: &'a str) -> Self {
        match path.split_once(RENAME_SEPARATOR) {
            Some((from, to)) => FileLabel::Renamed { from, to },
            None => FileLabel::Path(path),
        }
    }

    /// The path that exists in the working tree now.
    pub fn target(&self) -> &'a str {
        match *self {
            FileLabel::Path(path) => path,
            FileLabel::Renamed { to, .. } => to,
        }
    }

    /// Human-readable form: renames use an arrow, `old → new`.
    pub fn display(&self) -> String {
        match *self {
            FileLabel::Path(path) => path.to_string(),
            FileLabel::Renamed { from, to } => format!("{from} → {to}"),
        }
    }
}
