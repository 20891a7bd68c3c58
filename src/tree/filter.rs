//! Inclusion and exclusion decisions for candidate entries

use std::path::Path;

use crate::pattern::{Pattern, PatternSet};

use super::config::TreeOptions;

/// Extension and exclusion filter built from the tree options.
pub struct EntryFilter<'a> {
    extensions: Option<&'a Pattern>,
    exclude: &'a PatternSet,
}

impl<'a> EntryFilter<'a> {
    pub fn new(options: &'a TreeOptions) -> Self {
        Self {
            extensions: options.extensions.as_ref(),
            exclude: &options.exclude,
        }
    }

    /// True if any exclusion pattern matches the (pre-normalization) path.
    pub fn should_exclude(&self, path: &Path) -> bool {
        self.exclude.matches_path(path)
    }

    /// True if a file with this name passes the extension filter.
    /// Only ever asked about files.
    pub fn should_include_file(&self, name: &str) -> bool {
        self.extensions.is_none_or(|p| p.matches(name))
    }
}
