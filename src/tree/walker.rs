//! TreeWalker - builds the full tree in memory

use std::convert::Infallible;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::fs::{EntryStat, FileSystem, StdFs};

use super::attributes::AttributeCollector;
use super::callbacks::Callbacks;
use super::config::TreeOptions;
use super::filter::EntryFilter;
use super::node::TreeNode;
use super::utils::{name_of, normalize_path};

/// Build a tree for `root` on the real filesystem.
///
/// Returns `Ok(None)` when the root cannot be accessed or is itself filtered
/// out, and `Err` only for an invalid configuration.
pub fn build(root: impl AsRef<Path>, options: &TreeOptions) -> Result<Option<TreeNode>, ConfigError> {
    let walker = TreeWalker::new(options.clone())?;
    Ok(walker.walk(root))
}

/// Depth-first tree builder over a [`FileSystem`].
#[derive(Debug)]
pub struct TreeWalker<F = StdFs> {
    options: TreeOptions,
    fs: F,
}

impl TreeWalker<StdFs> {
    /// Validate `options` and create a walker over the real filesystem.
    pub fn new(options: TreeOptions) -> Result<Self, ConfigError> {
        Self::with_fs(options, StdFs)
    }
}

impl<F: FileSystem> TreeWalker<F> {
    /// Validate `options` and create a walker over `fs`.
    pub fn with_fs(options: TreeOptions, fs: F) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self { options, fs })
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Build the tree without callbacks.
    pub fn walk(&self, root: impl AsRef<Path>) -> Option<TreeNode> {
        match self.walk_with(root, Callbacks::<Infallible>::new()) {
            Ok(tree) => tree,
            Err(never) => match never {},
        }
    }

    /// Build the tree, calling `callbacks` once per retained node.
    ///
    /// The first callback error aborts the walk and is returned unchanged.
    pub fn walk_with<E>(
        &self,
        root: impl AsRef<Path>,
        mut callbacks: Callbacks<'_, E>,
    ) -> Result<Option<TreeNode>, E> {
        let root = root.as_ref();
        let mut walk = Walk {
            options: &self.options,
            fs: &self.fs,
            filter: EntryFilter::new(&self.options),
            collector: AttributeCollector::new(self.options.attributes),
            callbacks: &mut callbacks,
            chain: Vec::new(),
            skipped: 0,
        };

        let tree = walk.root(root)?;
        match &tree {
            Some(node) => {
                let (dirs, files) = node.count();
                debug!(
                    root = %root.display(),
                    dirs,
                    files,
                    skipped = walk.skipped,
                    "tree built"
                );
            }
            None => debug!(root = %root.display(), "root not accessible or filtered out"),
        }
        Ok(tree)
    }
}

/// State for one walk. Dropped when the walk returns.
struct Walk<'w, 'c, F, E> {
    options: &'w TreeOptions,
    fs: &'w F,
    filter: EntryFilter<'w>,
    collector: AttributeCollector,
    callbacks: &'w mut Callbacks<'c, E>,
    /// Resolved paths of the directories currently being descended.
    chain: Vec<PathBuf>,
    skipped: usize,
}

impl<F: FileSystem, E> Walk<'_, '_, F, E> {
    fn root(&mut self, path: &Path) -> Result<Option<TreeNode>, E> {
        if self.filter.should_exclude(path) {
            return Ok(None);
        }

        let stat = match self.fs.stat_entry(path) {
            Ok(stat) => stat,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "cannot stat root");
                return Ok(None);
            }
        };

        // The root is always dereferenced, whatever follow_symlinks says.
        let resolved = self.fs.resolve_symlink(path).ok();
        let stat = if stat.is_symlink() {
            let Some(target) = resolved.as_deref() else {
                debug!(path = %path.display(), "root is a dangling symlink");
                return Ok(None);
            };
            match self.fs.stat_entry(target) {
                Ok(stat) => stat,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "cannot stat root target");
                    return Ok(None);
                }
            }
        } else {
            stat
        };

        let name = name_of(path);
        if stat.is_file() {
            return self.file(path, name, &stat);
        }
        if !stat.is_dir() {
            return Ok(None);
        }

        let entries = match self.fs.list_entries(path) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "cannot list root");
                return Ok(None);
            }
        };
        let real = resolved.unwrap_or_else(|| path.to_path_buf());
        self.dir(path, name, &stat, real, entries, 0)
    }

    /// Visit a non-root entry at `depth` (the root's children are depth 1).
    fn visit(&mut self, path: &Path, name: String, depth: usize) -> Result<Option<TreeNode>, E> {
        if self.filter.should_exclude(path) {
            debug!(path = %path.display(), "excluded");
            return Ok(None);
        }

        let stat = match self.fs.stat_entry(path) {
            Ok(stat) => stat,
            Err(err) => return Ok(self.skip(path, "cannot stat entry", &err)),
        };

        let (stat, link_target) = if stat.is_symlink() {
            if !self.options.follow_symlinks {
                debug!(path = %path.display(), "not following symlink");
                return Ok(None);
            }
            let target = match self.fs.resolve_symlink(path) {
                Ok(target) => target,
                Err(err) => return Ok(self.skip(path, "cannot resolve symlink", &err)),
            };
            match self.fs.stat_entry(&target) {
                Ok(target_stat) => (target_stat, Some(target)),
                Err(err) => return Ok(self.skip(path, "cannot stat symlink target", &err)),
            }
        } else {
            (stat, None)
        };

        if stat.is_file() {
            return self.file(path, name, &stat);
        }
        if !stat.is_dir() {
            debug!(path = %path.display(), "skipping special file");
            return Ok(None);
        }

        let real = match link_target {
            Some(target) => {
                if self.chain.contains(&target) {
                    debug!(
                        path = %path.display(),
                        target = %target.display(),
                        "symlink cycle, not descending"
                    );
                    self.skipped += 1;
                    return Ok(None);
                }
                target
            }
            None => match self.chain.last() {
                Some(parent) => parent.join(&name),
                None => path.to_path_buf(),
            },
        };

        let at_max_depth = self.at_max_depth(depth);
        let entries = if at_max_depth {
            Vec::new()
        } else {
            match self.fs.list_entries(path) {
                Ok(entries) => entries,
                Err(err) => return Ok(self.skip(path, "cannot list directory", &err)),
            }
        };

        self.dir(path, name, &stat, real, entries, depth)
    }

    fn file(&mut self, path: &Path, name: String, stat: &EntryStat) -> Result<Option<TreeNode>, E> {
        if !self.filter.should_include_file(&name) {
            return Ok(None);
        }
        let node = self.collector.file_node(name, self.display_path(path), stat);
        self.callbacks.file(&node, node.path())?;
        Ok(Some(node))
    }

    fn dir(
        &mut self,
        path: &Path,
        name: String,
        stat: &EntryStat,
        real: PathBuf,
        entries: Vec<OsString>,
        depth: usize,
    ) -> Result<Option<TreeNode>, E> {
        let mut children = Vec::new();

        // If at max depth, keep the directory but don't descend
        if !self.at_max_depth(depth) {
            self.chain.push(real);
            for entry in entries {
                let child_name = entry.to_string_lossy().to_string();
                let child_path = path.join(&entry);
                if let Some(child) = self.visit(&child_path, child_name, depth + 1)? {
                    children.push(child);
                }
            }
            self.chain.pop();
        }

        let node = self
            .collector
            .dir_node(name, self.display_path(path), stat, children);
        self.callbacks.directory(&node, node.path())?;
        Ok(Some(node))
    }

    fn at_max_depth(&self, depth: usize) -> bool {
        self.options.depth.is_some_and(|max| depth >= max)
    }

    fn display_path(&self, path: &Path) -> PathBuf {
        if self.options.normalize_path {
            normalize_path(path)
        } else {
            path.to_path_buf()
        }
    }

    fn skip(&mut self, path: &Path, reason: &str, err: &std::io::Error) -> Option<TreeNode> {
        warn!(path = %path.display(), error = %err, kind = ?err.kind(), "{reason}, skipping");
        self.skipped += 1;
        None
    }
}
