//! Attribute collection for tree nodes

use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::fs::EntryStat;

use super::config::{Attribute, AttributeSet};
use super::node::{NodeType, TreeNode};
use super::utils::extension_of;

/// Builds nodes carrying exactly the requested attributes.
#[derive(Debug, Clone, Copy)]
pub struct AttributeCollector {
    attributes: AttributeSet,
}

impl AttributeCollector {
    pub fn new(attributes: AttributeSet) -> Self {
        Self { attributes }
    }

    /// Build a file node from its stat data.
    pub fn file_node(&self, name: String, path: PathBuf, stat: &EntryStat) -> TreeNode {
        let node_type = self.wants(Attribute::Type).then_some(NodeType::File);
        let extension = self.wants(Attribute::Extension).then(|| extension_of(&name));
        let size = self.wants(Attribute::Size).then_some(stat.size);
        let (mtime, ctime) = self.timestamps(stat);

        TreeNode::File {
            name,
            path,
            node_type,
            extension,
            size,
            mtime,
            ctime,
        }
    }

    /// Build a directory node over already-attributed children.
    ///
    /// The size is the sum of the retained children's sizes, so it is only
    /// correct when every child was built by this same collector.
    pub fn dir_node(
        &self,
        name: String,
        path: PathBuf,
        stat: &EntryStat,
        children: Vec<TreeNode>,
    ) -> TreeNode {
        let node_type = self.wants(Attribute::Type).then_some(NodeType::Directory);
        let size = self
            .wants(Attribute::Size)
            .then(|| children.iter().filter_map(TreeNode::size).sum());
        let (mtime, ctime) = self.timestamps(stat);

        TreeNode::Dir {
            name,
            path,
            node_type,
            size,
            mtime,
            ctime,
            children,
        }
    }

    fn wants(&self, attr: Attribute) -> bool {
        self.attributes.contains(attr)
    }

    fn timestamps(&self, stat: &EntryStat) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let mtime = if self.wants(Attribute::Mtime) {
            stat.mtime.map(to_utc)
        } else {
            None
        };
        let ctime = if self.wants(Attribute::Ctime) {
            stat.ctime.map(to_utc)
        } else {
            None
        };
        (mtime, ctime)
    }
}

fn to_utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}
