//! Configuration types for tree building

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::pattern::{Pattern, PatternSet};

/// An optional field that can be populated on tree nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Size,
    Type,
    Extension,
    Mtime,
    Ctime,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Size,
        Attribute::Type,
        Attribute::Extension,
        Attribute::Mtime,
        Attribute::Ctime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Size => "size",
            Attribute::Type => "type",
            Attribute::Extension => "extension",
            Attribute::Mtime => "mtime",
            Attribute::Ctime => "ctime",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Attribute::Size => 1,
            Attribute::Type => 1 << 1,
            Attribute::Extension => 1 << 2,
            Attribute::Mtime => 1 << 3,
            Attribute::Ctime => 1 << 4,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Attribute::ALL
            .into_iter()
            .find(|attr| attr.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownAttribute(s.to_string()))
    }
}

/// The set of attributes requested for a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeSet {
    bits: u8,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, attr: Attribute) {
        self.bits |= attr.bit();
    }

    pub fn contains(&self, attr: Attribute) -> bool {
        self.bits & attr.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        Attribute::ALL.into_iter().filter(|a| self.contains(*a))
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for attr in iter {
            set.insert(attr);
        }
        set
    }
}

/// Configuration for a single tree build. Immutable once handed to a walker.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Only files whose name matches are kept. Directories are never filtered by this.
    pub extensions: Option<Pattern>,
    /// Any match against an entry's path prunes the entry and its subtree.
    pub exclude: PatternSet,
    pub attributes: AttributeSet,
    /// Maximum levels below the root; `None` is unlimited.
    pub depth: Option<usize>,
    pub follow_symlinks: bool,
    /// Use `/` separators in the `path` field of every node.
    pub normalize_path: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            extensions: None,
            exclude: PatternSet::new(),
            attributes: AttributeSet::new(),
            depth: None,
            follow_symlinks: true,
            normalize_path: false,
        }
    }
}

impl TreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extensions(mut self, pattern: impl Into<Pattern>) -> Self {
        self.extensions = Some(pattern.into());
        self
    }

    /// Replace the exclusion patterns.
    pub fn with_exclude(mut self, patterns: impl Into<PatternSet>) -> Self {
        self.exclude = patterns.into();
        self
    }

    /// Add one exclusion pattern to those already configured.
    pub fn exclude(mut self, pattern: impl Into<Pattern>) -> Self {
        self.exclude.push(pattern);
        self
    }

    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes = attributes.into_iter().collect();
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn normalize_path(mut self, normalize: bool) -> Self {
        self.normalize_path = normalize;
        self
    }

    /// Reject option combinations that cannot produce a correct tree.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth.is_some() && self.attributes.contains(Attribute::Size) {
            return Err(ConfigError::SizeWithDepth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = TreeOptions::default();
        assert!(opts.extensions.is_none());
        assert!(opts.exclude.is_empty());
        assert!(opts.attributes.is_empty());
        assert_eq!(opts.depth, None);
        assert!(opts.follow_symlinks);
        assert!(!opts.normalize_path);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_size_with_depth_is_rejected() {
        let opts = TreeOptions::new()
            .with_depth(2)
            .with_attributes([Attribute::Size, Attribute::Type]);
        assert!(matches!(opts.validate(), Err(ConfigError::SizeWithDepth)));
    }

    #[test]
    fn test_depth_zero_with_size_is_rejected() {
        let opts = TreeOptions::new()
            .with_depth(0)
            .with_attributes([Attribute::Size]);
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_depth_without_size_is_fine() {
        let opts = TreeOptions::new()
            .with_depth(2)
            .with_attributes([Attribute::Type, Attribute::Extension]);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_attribute_parsing() {
        assert_eq!("size".parse::<Attribute>().unwrap(), Attribute::Size);
        assert_eq!(" MTIME ".parse::<Attribute>().unwrap(), Attribute::Mtime);
        assert!(matches!(
            "inode".parse::<Attribute>(),
            Err(ConfigError::UnknownAttribute(name)) if name == "inode"
        ));
    }

    #[test]
    fn test_attribute_set() {
        let set: AttributeSet = [Attribute::Ctime, Attribute::Size].into_iter().collect();
        assert!(set.contains(Attribute::Size));
        assert!(set.contains(Attribute::Ctime));
        assert!(!set.contains(Attribute::Type));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Attribute::Size, Attribute::Ctime]
        );
    }

    #[test]
    fn test_exclude_accumulates() {
        let opts = TreeOptions::new()
            .exclude(Pattern::regex("a").unwrap())
            .exclude(Pattern::glob("b*").unwrap());
        assert_eq!(opts.exclude.len(), 2);
    }
}
