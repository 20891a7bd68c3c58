//! Filesystem read surface used by the tree walker
//!
//! The walker never touches `std::fs` directly. Everything it needs goes
//! through the [`FileSystem`] trait: stat an entry without following links,
//! list a directory, and resolve a symbolic link to its final target.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// What kind of entry a stat call found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    /// FIFOs, sockets, devices.
    Other,
}

/// Metadata for a single entry, as returned by [`FileSystem::stat_entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStat {
    pub kind: EntryKind,
    pub size: u64,
    pub mtime: Option<SystemTime>,
    pub ctime: Option<SystemTime>,
}

impl EntryStat {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }
}

/// Narrow filesystem capability the walker calls through.
pub trait FileSystem {
    /// Stat `path` without following a trailing symbolic link.
    fn stat_entry(&self, path: &Path) -> io::Result<EntryStat>;

    /// List the entry names of a directory, in the order the platform returns them.
    fn list_entries(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Resolve `path` through every symbolic link to an absolute target path.
    fn resolve_symlink(&self, path: &Path) -> io::Result<PathBuf>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn stat_entry(&self, path: &Path) -> io::Result<EntryStat> {
        (**self).stat_entry(path)
    }

    fn list_entries(&self, path: &Path) -> io::Result<Vec<OsString>> {
        (**self).list_entries(path)
    }

    fn resolve_symlink(&self, path: &Path) -> io::Result<PathBuf> {
        (**self).resolve_symlink(path)
    }
}

/// The real filesystem, backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl FileSystem for StdFs {
    fn stat_entry(&self, path: &Path) -> io::Result<EntryStat> {
        let meta = std::fs::symlink_metadata(path)?;
        let file_type = meta.file_type();
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };

        Ok(EntryStat {
            kind,
            size: meta.len(),
            mtime: meta.modified().ok(),
            ctime: change_time(&meta),
        })
    }

    fn list_entries(&self, path: &Path) -> io::Result<Vec<OsString>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn resolve_symlink(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }
}

/// Inode status-change time on Unix.
#[cfg(unix)]
fn change_time(meta: &std::fs::Metadata) -> Option<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    use std::time::Duration;

    let secs = u64::try_from(meta.ctime()).ok()?;
    let nanos = u32::try_from(meta.ctime_nsec()).unwrap_or(0);
    SystemTime::UNIX_EPOCH.checked_add(Duration::new(secs, nanos))
}

/// Creation time where no status-change time exists.
#[cfg(not(unix))]
fn change_time(meta: &std::fs::Metadata) -> Option<SystemTime> {
    meta.created().ok()
}
