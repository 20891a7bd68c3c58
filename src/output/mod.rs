//! Tree formatting and display
//!
//! - `config` - Output configuration types
//! - `tree` - Console formatter with box-drawing connectors and colors
//! - `json` - JSON output

mod config;
mod json;
mod tree;

// Re-export public types and functions
pub use config::OutputConfig;
pub use json::{print_json, to_json};
pub use tree::TreeFormatter;
