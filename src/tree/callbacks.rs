//! Per-node visit callbacks

use std::fmt;
use std::path::Path;

use super::node::TreeNode;

type Callback<'a, E> = Box<dyn FnMut(&TreeNode, &Path) -> Result<(), E> + 'a>;

/// Optional `on_file` and `on_directory` hooks for a walk.
///
/// Each hook is called exactly once per node that ends up in the tree. An
/// `Err` returned by a hook stops the walk and is handed back to the caller
/// as-is.
pub struct Callbacks<'a, E> {
    on_file: Option<Callback<'a, E>>,
    on_directory: Option<Callback<'a, E>>,
}

impl<'a, E> Callbacks<'a, E> {
    pub fn new() -> Self {
        Self {
            on_file: None,
            on_directory: None,
        }
    }

    pub fn on_file(mut self, f: impl FnMut(&TreeNode, &Path) -> Result<(), E> + 'a) -> Self {
        self.on_file = Some(Box::new(f));
        self
    }

    pub fn on_directory(mut self, f: impl FnMut(&TreeNode, &Path) -> Result<(), E> + 'a) -> Self {
        self.on_directory = Some(Box::new(f));
        self
    }

    pub(crate) fn file(&mut self, node: &TreeNode, path: &Path) -> Result<(), E> {
        match self.on_file.as_mut() {
            Some(f) => f(node, path),
            None => Ok(()),
        }
    }

    pub(crate) fn directory(&mut self, node: &TreeNode, path: &Path) -> Result<(), E> {
        match self.on_directory.as_mut() {
            Some(f) => f(node, path),
            None => Ok(()),
        }
    }
}

impl<E> Default for Callbacks<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Callbacks<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_file", &self.on_file.is_some())
            .field("on_directory", &self.on_directory.is_some())
            .finish()
    }
}
