//! `src/fs/entry.rs`
//! ============================================================
//! Directory entries as shown in the list.
//!
//! Entries are rebuilt from the filesystem on every render and
//! never mutated afterwards. The raw OS name is what every
//! operation uses; `label` is only for drawing.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use tracing::trace;

use crate::error::AppResult;
use crate::fs::filesystem::FileSystem;

// ------------------------------------------------------------
// EntryKind: file or directory, decided at render time.
// ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

// ------------------------------------------------------------
// Entry: raw name, display label and resolved path.
// ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: OsString,
    /// Lossy UTF-8 rendering of `name`.
    pub label: CompactString,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    #[must_use]
    pub fn new(name: OsString, path: PathBuf, kind: EntryKind) -> Self {
        let label = CompactString::from(name.to_string_lossy());
        Self {
            name,
            label,
            path,
            kind,
        }
    }
}

/// List `location` and classify each child. Order is whatever the
/// filesystem hands back; no sorting is applied.
pub fn scan_entries(fs: &dyn FileSystem, location: &Path) -> AppResult<Vec<Entry>> {
    let names = fs.list_children(location)?;

    let entries: Vec<Entry> = names
        .into_iter()
        .map(|name| {
            let path = location.join(&name);
            let kind = if fs.is_directory(&path) {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            Entry::new(name, path, kind)
        })
        .collect();

    trace!(location = %location.display(), count = entries.len(), "Scanned entries");
    Ok(entries)
}
