//! `src/fs/filesystem.rs`
//! ============================================================
//! Filesystem collaborator used by the navigator and the camera.
//!
//! Every call is synchronous and runs on the event thread. Errors
//! come back as `AppError::Filesystem` carrying the operation name
//! and the path that failed.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{AppError, AppResult};

/// The filesystem operations the core needs.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents. With `exist_ok == false` an
    /// existing directory is an error.
    fn make_directory(&self, path: &Path, exist_ok: bool) -> AppResult<()>;

    /// Raw child names in the order the OS returns them. Names are not
    /// required to be valid UTF-8.
    fn list_children(&self, path: &Path) -> AppResult<Vec<OsString>>;

    fn is_directory(&self, path: &Path) -> bool;

    /// True for regular files and for symlinks (dangling ones included).
    fn is_file_or_link(&self, path: &Path) -> bool;

    fn remove_file(&self, path: &Path) -> AppResult<()>;

    /// Recursive directory removal.
    fn remove_tree(&self, path: &Path) -> AppResult<()>;

    fn write_file(&self, path: &Path, bytes: &[u8]) -> AppResult<()>;
}

/// `std::fs` backed implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as present
        fs::symlink_metadata(path).is_ok()
    }

    fn make_directory(&self, path: &Path, exist_ok: bool) -> AppResult<()> {
        if !exist_ok && path.exists() {
            return Err(AppError::filesystem(
                "create",
                path,
                std::io::Error::new(std::io::ErrorKind::AlreadyExists, "already exists"),
            ));
        }

        fs::create_dir_all(path).map_err(|e| AppError::filesystem("create", path, e))?;
        debug!(path = %path.display(), "Directory created");
        Ok(())
    }

    fn list_children(&self, path: &Path) -> AppResult<Vec<OsString>> {
        let read_dir = fs::read_dir(path).map_err(|e| AppError::filesystem("open", path, e))?;

        let mut names = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| AppError::filesystem("open", path, e))?;
            names.push(entry.file_name());
        }

        trace!(path = %path.display(), count = names.len(), "Listed directory");
        Ok(names)
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file_or_link(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|m| m.file_type().is_file() || m.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn remove_file(&self, path: &Path) -> AppResult<()> {
        fs::remove_file(path).map_err(|e| AppError::filesystem("delete", path, e))
    }

    fn remove_tree(&self, path: &Path) -> AppResult<()> {
        fs::remove_dir_all(path).map_err(|e| AppError::filesystem("delete", path, e))
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> AppResult<()> {
        fs::write(path, bytes).map_err(|e| AppError::filesystem("save", path, e))
    }
}

/// Real filesystem that refuses to list one directory, as if its
/// permissions had been revoked. The directory can be picked after the
/// filesystem was handed over.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct UnlistableDir {
    pub(crate) dir: std::rc::Rc<std::cell::RefCell<Option<std::path::PathBuf>>>,
}

#[cfg(test)]
impl FileSystem for UnlistableDir {
    fn exists(&self, path: &Path) -> bool {
        StdFileSystem.exists(path)
    }

    fn make_directory(&self, path: &Path, exist_ok: bool) -> AppResult<()> {
        StdFileSystem.make_directory(path, exist_ok)
    }

    fn list_children(&self, path: &Path) -> AppResult<Vec<OsString>> {
        if self.dir.borrow().as_deref() == Some(path) {
            return Err(AppError::filesystem(
                "open",
                path,
                std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            ));
        }
        StdFileSystem.list_children(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        StdFileSystem.is_directory(path)
    }

    fn is_file_or_link(&self, path: &Path) -> bool {
        StdFileSystem.is_file_or_link(path)
    }

    fn remove_file(&self, path: &Path) -> AppResult<()> {
        StdFileSystem.remove_file(path)
    }

    fn remove_tree(&self, path: &Path) -> AppResult<()> {
        StdFileSystem.remove_tree(path)
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> AppResult<()> {
        StdFileSystem.write_file(path, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn make_directory_respects_exist_ok() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b");
        let fs = StdFileSystem;

        fs.make_directory(&dir, false).unwrap();
        assert!(fs.is_directory(&dir));

        assert!(fs.make_directory(&dir, true).is_ok());
        assert!(fs.make_directory(&dir, false).is_err());
    }

    #[test]
    fn list_children_returns_names_only() {
        let tmp = TempDir::new().unwrap();
        let fs = StdFileSystem;
        fs.make_directory(&tmp.path().join("home1"), true).unwrap();
        fs.write_file(&tmp.path().join("IMG_1.png"), b"png").unwrap();

        let mut names = fs.list_children(tmp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec![OsString::from("IMG_1.png"), OsString::from("home1")]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn list_children_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let fs = StdFileSystem;
        let raw = OsStr::from_bytes(b"dom\xff");
        fs.make_directory(&tmp.path().join(raw), true).unwrap();

        assert_eq!(fs.list_children(tmp.path()).unwrap(), vec![raw.to_os_string()]);
    }

    #[test]
    fn list_children_of_a_file_fails() {
        let tmp = TempDir::new().unwrap();
        let fs = StdFileSystem;
        let file = tmp.path().join("note.txt");
        fs.write_file(&file, b"x").unwrap();

        let err = fs.list_children(&file).unwrap_err();
        assert!(matches!(err, AppError::Filesystem { operation: "open", .. }));
    }

    #[test]
    fn kinds_and_removal() {
        let tmp = TempDir::new().unwrap();
        let fs = StdFileSystem;
        let file = tmp.path().join("f.png");
        let dir = tmp.path().join("d");
        fs.write_file(&file, b"x").unwrap();
        fs.make_directory(&dir.join("inner"), true).unwrap();
        fs.write_file(&dir.join("inner/g.png"), b"y").unwrap();

        assert!(fs.is_file_or_link(&file));
        assert!(!fs.is_directory(&file));
        assert!(fs.is_directory(&dir));
        assert!(!fs.is_file_or_link(&dir));

        fs.remove_file(&file).unwrap();
        fs.remove_tree(&dir).unwrap();
        assert!(!fs.exists(&file));
        assert!(!fs.exists(&dir));
    }

    #[test]
    fn removing_missing_file_reports_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = StdFileSystem
            .remove_file(&tmp.path().join("nope"))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
