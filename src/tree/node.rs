//! Tree node types

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The `type` attribute of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    File,
    Directory,
}

/// One entry in a built tree.
///
/// Optional fields are `None` unless the matching attribute was requested,
/// and are left out of the serialized form entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TreeNode {
    File {
        name: String,
        path: PathBuf,
        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        node_type: Option<NodeType>,
        #[serde(skip_serializing_if = "Option::is_none")]
        extension: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        mtime: Option<DateTime<Utc>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ctime: Option<DateTime<Utc>>,
    },
    Dir {
        name: String,
        path: PathBuf,
        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        node_type: Option<NodeType>,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        mtime: Option<DateTime<Utc>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ctime: Option<DateTime<Utc>>,
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::File { name, .. } => name,
            TreeNode::Dir { name, .. } => name,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            TreeNode::File { path, .. } => path,
            TreeNode::Dir { path, .. } => path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Dir { .. })
    }

    pub fn size(&self) -> Option<u64> {
        match self {
            TreeNode::File { size, .. } => *size,
            TreeNode::Dir { size, .. } => *size,
        }
    }

    /// Direct children; empty for files.
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::File { .. } => &[],
            TreeNode::Dir { children, .. } => children,
        }
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children().iter().find(|c| c.name() == name)
    }

    /// Count (directories, files) in this subtree, including this node.
    pub fn count(&self) -> (usize, usize) {
        match self {
            TreeNode::File { .. } => (0, 1),
            TreeNode::Dir { children, .. } => {
                children.iter().fold((1, 0), |(dirs, files), child| {
                    let (d, f) = child.count();
                    (dirs + d, files + f)
                })
            }
        }
    }

    /// Depth-first, pre-order iterator over this node and all its descendants.
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children().iter().rev());
            Some(node)
        })
    }
}
