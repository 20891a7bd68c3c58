//! Path and name matchers used for exclusion and extension filtering

use std::path::Path;

use regex::Regex;

use crate::error::ConfigError;

/// A single matcher, either a regular expression or a shell glob.
///
/// Regular expressions are searched anywhere in the candidate string, so
/// `another_dir` matches `/tmp/root/another_dir/file.txt`. Globs must match
/// either the entry's final component or the whole path.
#[derive(Debug, Clone)]
pub enum Pattern {
    Regex(Regex),
    Glob(glob::Pattern),
}

impl Pattern {
    /// Compile a regular expression pattern.
    pub fn regex(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(Pattern::Regex)
            .map_err(|e| ConfigError::InvalidPattern {
                kind: "regex",
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// Compile a glob pattern.
    pub fn glob(pattern: &str) -> Result<Self, ConfigError> {
        glob::Pattern::new(pattern)
            .map(Pattern::Glob)
            .map_err(|e| ConfigError::InvalidPattern {
                kind: "glob",
                pattern: pattern.to_string(),
                message: e.msg.to_string(),
            })
    }

    /// Test a plain string (a file name, usually).
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Pattern::Regex(re) => re.is_match(candidate),
            Pattern::Glob(glob) => glob.matches(candidate),
        }
    }

    /// Test a filesystem path.
    pub fn matches_path(&self, path: &Path) -> bool {
        match self {
            Pattern::Regex(re) => re.is_match(&path.to_string_lossy()),
            Pattern::Glob(glob) => {
                let name_matches = path
                    .file_name()
                    .map(|name| glob.matches(&name.to_string_lossy()))
                    .unwrap_or(false);
                name_matches || glob.matches_path(path)
            }
        }
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Pattern::Regex(re)
    }
}

impl From<glob::Pattern> for Pattern {
    fn from(glob: glob::Pattern) -> Self {
        Pattern::Glob(glob)
    }
}

/// An ordered set of patterns with "any matches" semantics.
///
/// An empty set matches nothing.
#[derive(Debug, Clone, Default)]
pub struct PatternSet(Vec<Pattern>);

impl PatternSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, pattern: impl Into<Pattern>) {
        self.0.push(pattern.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn matches_path(&self, path: &Path) -> bool {
        self.0.iter().any(|p| p.matches_path(path))
    }
}

impl From<Pattern> for PatternSet {
    fn from(pattern: Pattern) -> Self {
        Self(vec![pattern])
    }
}

impl From<Regex> for PatternSet {
    fn from(re: Regex) -> Self {
        Self(vec![Pattern::Regex(re)])
    }
}

impl From<Vec<Pattern>> for PatternSet {
    fn from(patterns: Vec<Pattern>) -> Self {
        Self(patterns)
    }
}

impl FromIterator<Pattern> for PatternSet {
    fn from_iter<I: IntoIterator<Item = Pattern>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_matches_anywhere_in_path() {
        let p = Pattern::regex("another_dir").unwrap();
        assert!(p.matches_path(Path::new("/tmp/root/another_dir")));
        assert!(p.matches_path(Path::new("/tmp/root/another_dir/a.txt")));
        assert!(!p.matches_path(Path::new("/tmp/root/some_dir")));
    }

    #[test]
    fn test_regex_anchored_extension() {
        let p = Pattern::regex(r"\.txt$").unwrap();
        assert!(p.matches("file_a.txt"));
        assert!(!p.matches("file_a.txt.bak"));
        assert!(!p.matches("file_a.md"));
    }

    #[test]
    fn test_glob_match() {
        // Basic patterns
        let rs = Pattern::glob("*.rs").unwrap();
        assert!(rs.matches("main.rs"));
        assert!(!rs.matches("main.py"));

        // Single character wildcard
        let single = Pattern::glob("test?.rs").unwrap();
        assert!(single.matches("test1.rs"));
        assert!(!single.matches("test12.rs"));

        // Character classes and ranges
        let class = Pattern::glob("[a-z].txt").unwrap();
        assert!(class.matches("x.txt"));
        assert!(!class.matches("X.txt"));
    }

    #[test]
    fn test_glob_matches_name_or_full_path() {
        let by_name = Pattern::glob("node_*").unwrap();
        assert!(by_name.matches_path(Path::new("/srv/app/node_modules")));
        assert!(!by_name.matches_path(Path::new("/srv/app/src")));

        let by_path = Pattern::glob("/srv/*/build").unwrap();
        assert!(by_path.matches_path(Path::new("/srv/app/build")));
    }

    #[test]
    fn test_invalid_patterns_are_config_errors() {
        let err = Pattern::regex("(unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { kind: "regex", .. }));

        let err = Pattern::glob("[").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { kind: "glob", .. }));
    }

    #[test]
    fn test_pattern_set_any_semantics() {
        let set: PatternSet = vec![
            Pattern::regex("another_dir").unwrap(),
            Pattern::regex("some_dir_2").unwrap(),
        ]
        .into();
        assert_eq!(set.len(), 2);
        assert!(set.matches_path(Path::new("root/another_dir")));
        assert!(set.matches_path(Path::new("root/some_dir_2")));
        assert!(!set.matches_path(Path::new("root/some_dir")));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let set = PatternSet::new();
        assert!(set.is_empty());
        assert!(!set.matches_path(Path::new("anything")));
    }
}
