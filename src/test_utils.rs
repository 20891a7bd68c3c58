//! Test utilities: temporary fixture directories and an in-memory filesystem.
//!
//! This module is only compiled for tests and benchmarks.

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

use crate::fs::{EntryKind, EntryStat, FileSystem};

/// Files in the reference layout, with their sizes in bytes.
pub const REFERENCE_FILES: &[(&str, usize)] = &[
    ("file_a.txt", 12),
    ("file_b.txt", 3_000),
    ("some_dir/file_a.txt", 12),
    ("some_dir/file_b.txt", 4_000),
    ("some_dir/another_dir/file_a.txt", 12),
    ("some_dir/another_dir/file_b.txt", 4_500),
    ("some_dir_2/.gitkeep", 0),
];

/// A temporary directory for testing.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Create the reference layout: `some_dir` (holding `another_dir`),
    /// `some_dir_2` (no `.txt` files), six `.txt` files and one other file.
    pub fn reference() -> Self {
        let dir = Self::new();
        for (path, size) in REFERENCE_FILES {
            dir.add_file(path, &"x".repeat(*size));
        }
        dir
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Add a symbolic link at `path` pointing to `target` (used verbatim).
    #[cfg(unix)]
    pub fn add_symlink(&self, path: &str, target: impl AsRef<Path>) -> PathBuf {
        let full_path = self.dir.path().join(path);
        std::os::unix::fs::symlink(target, &full_path).expect("Failed to create symlink");
        full_path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
enum MemEntry {
    File { size: u64 },
    Dir { children: Vec<OsString> },
    Symlink { target: PathBuf },
}

/// An in-memory [`FileSystem`] with deterministic listing order.
///
/// Paths are absolute. Entries list in insertion order, and every entry has
/// the same fixed timestamps.
#[derive(Debug, Clone)]
pub struct MemoryFs {
    entries: HashMap<PathBuf, MemEntry>,
    deny_stat: HashSet<PathBuf>,
    deny_list: HashSet<PathBuf>,
}

const MAX_SYMLINK_HOPS: usize = 40;

impl MemoryFs {
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            PathBuf::from("/"),
            MemEntry::Dir {
                children: Vec::new(),
            },
        );
        Self {
            entries,
            deny_stat: HashSet::new(),
            deny_list: HashSet::new(),
        }
    }

    /// Add a file of `size` bytes, creating parent directories as needed.
    pub fn add_file(&mut self, path: impl AsRef<Path>, size: u64) -> &mut Self {
        self.insert(path.as_ref(), MemEntry::File { size });
        self
    }

    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        if !matches!(self.entries.get(path), Some(MemEntry::Dir { .. })) {
            self.insert(
                path,
                MemEntry::Dir {
                    children: Vec::new(),
                },
            );
        }
        self
    }

    /// Add a link; relative targets resolve against the link's directory.
    pub fn add_symlink(&mut self, path: impl AsRef<Path>, target: impl AsRef<Path>) -> &mut Self {
        self.insert(
            path.as_ref(),
            MemEntry::Symlink {
                target: target.as_ref().to_path_buf(),
            },
        );
        self
    }

    /// Make `stat_entry` (and listing) fail with permission denied.
    pub fn deny_stat(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.deny_stat.insert(path.as_ref().to_path_buf());
        self
    }

    /// Make `list_entries` fail with permission denied.
    pub fn deny_list(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.deny_list.insert(path.as_ref().to_path_buf());
        self
    }

    fn insert(&mut self, path: &Path, entry: MemEntry) {
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            if !self.entries.contains_key(parent) {
                self.add_dir(parent);
            }
            if let Some(MemEntry::Dir { children }) = self.entries.get_mut(parent) {
                if !children.iter().any(|c| c == name) {
                    children.push(name.to_os_string());
                }
            }
        }
        self.entries.insert(path.to_path_buf(), entry);
    }

    /// Resolve symlinks in every component, and in the last one if `follow_last`.
    fn resolve(&self, path: &Path, follow_last: bool) -> io::Result<PathBuf> {
        let mut pending: Vec<OsString> = Vec::new();
        push_components(&mut pending, path);
        let mut resolved = PathBuf::from("/");
        let mut hops = 0;

        while let Some(part) = pending.pop() {
            if part == "/" {
                resolved = PathBuf::from("/");
                continue;
            }
            if part == ".." {
                resolved.pop();
                continue;
            }
            let candidate = resolved.join(&part);
            let is_last = pending.is_empty();
            match self.entries.get(&candidate) {
                Some(MemEntry::Symlink { target }) if follow_last || !is_last => {
                    hops += 1;
                    if hops > MAX_SYMLINK_HOPS {
                        return Err(io::Error::other("too many levels of symbolic links"));
                    }
                    push_components(&mut pending, target);
                }
                _ => resolved = candidate,
            }
        }
        Ok(resolved)
    }

    fn lookup(&self, resolved: &Path) -> io::Result<&MemEntry> {
        self.entries
            .get(resolved)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file or directory"))
    }
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

/// Push `path`'s components so that the first one is popped first.
fn push_components(pending: &mut Vec<OsString>, path: &Path) {
    let parts: Vec<OsString> = path
        .components()
        .filter_map(|c| match c {
            Component::RootDir => Some(OsString::from("/")),
            Component::ParentDir => Some(OsString::from("..")),
            Component::Normal(name) => Some(name.to_os_string()),
            Component::CurDir | Component::Prefix(_) => None,
        })
        .collect();
    pending.extend(parts.into_iter().rev());
}

fn permission_denied() -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, "permission denied")
}

impl FileSystem for MemoryFs {
    fn stat_entry(&self, path: &Path) -> io::Result<EntryStat> {
        let resolved = self.resolve(path, false)?;
        if self.deny_stat.contains(&resolved) {
            return Err(permission_denied());
        }
        let (kind, size) = match self.lookup(&resolved)? {
            MemEntry::File { size } => (EntryKind::File, *size),
            MemEntry::Dir { .. } => (EntryKind::Directory, 4096),
            MemEntry::Symlink { target } => (EntryKind::Symlink, target.as_os_str().len() as u64),
        };
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        Ok(EntryStat {
            kind,
            size,
            mtime: Some(time),
            ctime: Some(time),
        })
    }

    fn list_entries(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let resolved = self.resolve(path, true)?;
        if self.deny_stat.contains(&resolved) || self.deny_list.contains(&resolved) {
            return Err(permission_denied());
        }
        match self.lookup(&resolved)? {
            MemEntry::Dir { children } => Ok(children.clone()),
            _ => Err(io::Error::new(io::ErrorKind::NotADirectory, "not a directory")),
        }
    }

    fn resolve_symlink(&self, path: &Path) -> io::Result<PathBuf> {
        let resolved = self.resolve(path, true)?;
        self.lookup(&resolved)?;
        Ok(resolved)
    }
}
