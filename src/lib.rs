//! dirtree - build an in-memory tree of a directory, with filters and computed attributes

pub mod error;
pub mod fs;
pub mod output;
pub mod pattern;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::ConfigError;
pub use fs::{EntryKind, EntryStat, FileSystem, StdFs};
pub use output::{OutputConfig, TreeFormatter, print_json, to_json};
pub use pattern::{Pattern, PatternSet};
pub use tree::{Attribute, AttributeSet, Callbacks, NodeType, TreeNode, TreeOptions, TreeWalker, build};
