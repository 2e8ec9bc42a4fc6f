//! ``src/model/nav_state.rs``
//! ============================================================================
//! # `NavigatorState`: where the user stands and what they captured
//!
//! The state is an explicit value owned by the navigator. The UI only reads
//! it (through [`Listing`] and the counter accessor) when drawing.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use compact_str::CompactString;

use crate::error::AppError;
use crate::fs::entry::Entry;

/// Title shown when the location has no usable basename.
pub const DEFAULT_TITLE: &str = "File Manager";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorState {
    base_path: PathBuf,

    /// Always `base_path` or one of its descendants.
    location: PathBuf,

    photo_count: u64,
}

impl NavigatorState {
    #[must_use]
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            location: base_path.clone(),
            base_path,
            photo_count: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    #[inline]
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    #[inline]
    #[must_use]
    pub fn at_base(&self) -> bool {
        self.location == self.base_path
    }

    /// True for `base_path` and anything strictly below it.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.base_path)
    }

    /// Move to `path`, falling back to `base_path` for anything outside
    /// the managed subtree.
    pub(crate) fn set_location(&mut self, path: PathBuf) {
        if self.contains(&path) {
            self.location = path;
        } else {
            self.location = self.base_path.clone();
        }
    }

    #[inline]
    #[must_use]
    pub const fn photo_count(&self) -> u64 {
        self.photo_count
    }

    pub(crate) fn record_photo(&mut self) {
        self.photo_count = self.photo_count.saturating_add(1);
    }

    pub fn reset_photo_count(&mut self) {
        self.photo_count = 0;
    }
}

/// One rendered location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub location: PathBuf,
    pub title: CompactString,
    pub at_base: bool,
    pub entries: Vec<Entry>,
}

impl Listing {
    pub(crate) fn new(state: &NavigatorState, entries: Vec<Entry>) -> Self {
        let title = state
            .location()
            .file_name()
            .map(|n| n.to_string_lossy())
            .filter(|n| !n.is_empty())
            .map_or_else(|| CompactString::const_new(DEFAULT_TITLE), CompactString::from);

        Self {
            location: state.location().to_path_buf(),
            title,
            at_base: state.at_base(),
            entries,
        }
    }

    /// The ".." row.
    #[inline]
    #[must_use]
    pub const fn show_up(&self) -> bool {
        !self.at_base
    }

    #[inline]
    #[must_use]
    pub const fn can_create_numbered(&self) -> bool {
        !self.at_base
    }

    #[inline]
    #[must_use]
    pub const fn can_capture(&self) -> bool {
        !self.at_base
    }

    #[must_use]
    pub fn entry(&self, name: &OsStr) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// A long press turned into a pending deletion, waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteIntent {
    /// Display form of the entry name.
    pub name: CompactString,
    pub target: PathBuf,
}

/// Outcome of sweeping the current location.
#[derive(Debug, Default)]
pub struct DeleteAllReport {
    pub removed: usize,
    pub failed: Vec<(CompactString, AppError)>,
}

impl DeleteAllReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
