//! Output configuration types

/// Configuration for console output.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Append the human-readable size to entries that carry one.
    pub show_size: bool,
    /// Append the modification time to entries that carry one.
    pub show_mtime: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            show_size: true,
            show_mtime: true,
        }
    }
}
