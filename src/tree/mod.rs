//! Directory tree building
//!
//! `TreeWalker` descends a directory depth-first and builds an owned
//! `TreeNode` tree. Each entry is first checked against the exclusion
//! patterns, then (for files) the extension pattern, and only then statted
//! for attributes. Directory sizes are summed from their children as the
//! recursion unwinds.

mod attributes;
mod callbacks;
mod config;
mod filter;
mod node;
mod utils;
mod walker;

// Re-export public types
pub use attributes::AttributeCollector;
pub use callbacks::Callbacks;
pub use config::{Attribute, AttributeSet, TreeOptions};
pub use filter::EntryFilter;
pub use node::{NodeType, TreeNode};
pub use utils::{extension_of, format_size, normalize_path};
pub use walker::{TreeWalker, build};
