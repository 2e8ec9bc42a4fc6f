//! ``src/model/navigator.rs``
//! ============================================================================
//! # `Navigator`: a reducer over (location, press event)
//!
//! Owns the [`NavigatorState`] and the filesystem collaborator. Every
//! operation runs synchronously to completion; on error the state is left
//! where it was (or clamped to the nearest existing ancestor) so the next
//! render always succeeds.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use tracing::{debug, info, instrument, warn};

use crate::error::{AppError, AppResult};
use crate::fs::entry::scan_entries;
use crate::fs::filesystem::FileSystem;
use crate::model::nav_state::{DeleteAllReport, DeleteIntent, Listing, NavigatorState};

pub struct Navigator {
    state: NavigatorState,
    fs: Box<dyn FileSystem>,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Navigator {
    #[must_use]
    pub fn new(base_path: PathBuf, fs: Box<dyn FileSystem>) -> Self {
        Self {
            state: NavigatorState::new(base_path),
            fs,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut NavigatorState {
        &mut self.state
    }

    #[inline]
    #[must_use]
    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// List the current location. `base_path` is created when missing; a
    /// vanished sub-location is first clamped to its nearest existing
    /// ancestor.
    #[instrument(level = "debug", skip(self), fields(location = %self.state.location().display()))]
    pub fn render(&mut self) -> AppResult<Listing> {
        self.clamp_to_existing();

        let location = self.state.location().to_path_buf();
        if !self.fs.exists(&location) {
            info!(path = %location.display(), "Creating base directory");
            self.fs.make_directory(&location, true)?;
        }

        let entries = scan_entries(self.fs.as_ref(), &location)?;
        Ok(Listing::new(&self.state, entries))
    }

    /// Enter `location/name`. Nothing checks up front that it is a
    /// directory: the listing is attempted and, if it fails, the location
    /// stays where it was.
    #[instrument(level = "info", skip_all, fields(name = ?name.as_ref()))]
    pub fn descend(&mut self, name: impl AsRef<OsStr>) -> AppResult<Listing> {
        let name = name.as_ref();
        validate_entry_name("entry", name)?;
        let target = self.state.location().join(name);

        let listing = self.list_then_move(target)?;
        debug!(location = %self.state.location().display(), "Descended");
        Ok(listing)
    }

    /// Go to the parent location. `Ok(None)` at `base_path`, where nothing
    /// changes. The parent is listed before the move, so a parent that
    /// cannot be read leaves the location where it was.
    #[instrument(level = "info", skip(self))]
    pub fn ascend(&mut self) -> AppResult<Option<Listing>> {
        if self.state.at_base() {
            return Ok(None);
        }

        let parent = self
            .state
            .location()
            .parent()
            .map_or_else(|| self.state.base_path().to_path_buf(), Path::to_path_buf);

        let listing = self.list_then_move(parent)?;
        debug!(location = %self.state.location().display(), "Ascended");
        Ok(Some(listing))
    }

    /// Scan `target` and commit the move only once the scan succeeded.
    fn list_then_move(&mut self, target: PathBuf) -> AppResult<Listing> {
        match scan_entries(self.fs.as_ref(), &target) {
            Ok(entries) => {
                self.state.set_location(target);
                Ok(Listing::new(&self.state, entries))
            }
            Err(e) => {
                let reason = if self.fs.exists(&target) && !self.fs.is_directory(&target) {
                    "not a folder".to_string()
                } else if e.is_not_found() {
                    "no longer exists".to_string()
                } else {
                    e.to_string()
                };
                warn!(path = %target.display(), error = %e, "Cannot open location");
                Err(AppError::navigation(target, reason))
            }
        }
    }

    /// Long press on an entry. The location does not change; the caller is
    /// expected to ask for confirmation and then call [`Self::confirm_delete`].
    pub fn request_delete(&self, name: impl AsRef<OsStr>) -> AppResult<DeleteIntent> {
        let name = name.as_ref();
        validate_entry_name("entry", name)?;
        Ok(DeleteIntent {
            name: CompactString::from(name.to_string_lossy()),
            target: self.state.location().join(name),
        })
    }

    /// Remove the confirmed target: files and links directly, directories
    /// recursively.
    #[instrument(level = "info", skip(self), fields(target = %intent.target.display()))]
    pub fn confirm_delete(&mut self, intent: &DeleteIntent) -> AppResult<()> {
        let target = intent.target.as_path();
        if !self.state.contains(target) || target == self.state.base_path() {
            return Err(AppError::validation(
                "entry",
                "Only entries inside the base folder can be deleted",
            ));
        }

        self.remove_path(target)?;
        info!(path = %target.display(), "Deleted");

        self.clamp_to_existing();
        Ok(())
    }

    /// Create `location/name`. An empty name is rejected without touching
    /// the filesystem.
    #[instrument(level = "info", skip(self))]
    pub fn create_directory(&mut self, name: &str) -> AppResult<PathBuf> {
        if name.trim().is_empty() {
            return Err(AppError::validation("name", "Enter a name"));
        }
        validate_entry_name("name", OsStr::new(name))?;

        let path = self.state.location().join(name);
        self.fs.make_directory(&path, true)?;
        info!(path = %path.display(), "Directory created");
        Ok(path)
    }

    /// Create `prefix{n+1}` where `n` counts the entries starting with
    /// `prefix`. After a deletion in the middle of a sequence this lands
    /// on an existing name, which `exist_ok` then leaves untouched.
    #[instrument(level = "info", skip(self))]
    pub fn create_numbered(&mut self, prefix: &str) -> AppResult<CompactString> {
        if prefix.trim().is_empty() {
            return Err(AppError::validation("prefix", "Entry prefix is empty"));
        }

        let location = self.state.location().to_path_buf();
        let count = self
            .fs
            .list_children(&location)?
            .iter()
            .filter(|name| name.to_string_lossy().starts_with(prefix))
            .count();

        let name = compact_str::format_compact!("{prefix}{}", count + 1);
        validate_entry_name("prefix", OsStr::new(name.as_str()))?;
        self.fs.make_directory(&location.join(name.as_str()), true)?;
        info!(name = %name, "Numbered entry created");
        Ok(name)
    }

    /// Remove every child of the current location. Failures are collected
    /// and the sweep goes on.
    #[instrument(level = "info", skip(self), fields(location = %self.state.location().display()))]
    pub fn delete_all(&mut self) -> AppResult<DeleteAllReport> {
        let location = self.state.location().to_path_buf();
        let mut report = DeleteAllReport::default();

        for name in self.fs.list_children(&location)? {
            let path = location.join(&name);
            match self.remove_path(&path) {
                Ok(()) => report.removed += 1,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to delete");
                    report
                        .failed
                        .push((CompactString::from(name.to_string_lossy()), e));
                }
            }
        }

        info!(
            removed = report.removed,
            failed = report.failed.len(),
            "Delete all finished"
        );
        Ok(report)
    }

    fn remove_path(&self, path: &Path) -> AppResult<()> {
        if self.fs.is_file_or_link(path) {
            self.fs.remove_file(path)
        } else if self.fs.is_directory(path) {
            self.fs.remove_tree(path)
        } else {
            Err(AppError::filesystem(
                "delete",
                path,
                io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
            ))
        }
    }

    /// Walk up until the location is an existing directory, stopping at
    /// `base_path`.
    fn clamp_to_existing(&mut self) {
        while !self.state.at_base() && !self.fs.is_directory(self.state.location()) {
            let missing = self.state.location().to_path_buf();
            let parent = missing
                .parent()
                .map_or_else(|| self.state.base_path().to_path_buf(), Path::to_path_buf);
            self.state.set_location(parent);
            debug!(
                missing = %missing.display(),
                location = %self.state.location().display(),
                "Location vanished, moved up"
            );
        }
    }
}

/// Names coming from the list or the prompt must name a direct child.
fn validate_entry_name(field: &str, name: &OsStr) -> AppResult<()> {
    if name.is_empty() {
        return Err(AppError::validation(field, "Enter a name"));
    }
    if name == "." || name == ".." {
        return Err(AppError::validation(
            field,
            format!("'{}' is not allowed", name.to_string_lossy()),
        ));
    }
    let has_separator = name
        .as_encoded_bytes()
        .iter()
        .any(|&b| b == b'/' || (cfg!(windows) && b == b'\\'));
    if has_separator {
        return Err(AppError::validation(
            field,
            "Names cannot contain path separators",
        ));
    }
    Ok(())
}
