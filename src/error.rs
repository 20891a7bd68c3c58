//! Error types for tree building

use thiserror::Error;

/// Errors raised while validating a tree configuration.
///
/// These are reported before any filesystem access happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A depth-truncated subtree cannot produce a correct aggregate size.
    #[error("usage of size attribute with depth option is prohibited")]
    SizeWithDepth,

    /// A pattern string could not be compiled.
    #[error("invalid {kind} pattern '{pattern}': {message}")]
    InvalidPattern {
        kind: &'static str,
        pattern: String,
        message: String,
    },

    /// An attribute name was not recognized.
    #[error("unknown attribute '{0}' (expected size, type, extension, mtime or ctime)")]
    UnknownAttribute(String),
}
