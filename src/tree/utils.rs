//! Shared utility functions for tree building

use std::path::{Path, PathBuf};

/// Replace `\` separators with `/`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if s.contains('\\') {
        PathBuf::from(s.replace('\\', "/"))
    } else {
        path.to_path_buf()
    }
}

/// Lowercased extension of a file name, dot included (`.txt`).
///
/// Empty when the name has no dot, or only a leading one (`.bashrc`).
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// Get the display name of a path, defaulting to "." for a bare root.
pub fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string())
}

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new(r"test\test_data\file_a.txt")),
            PathBuf::from("test/test_data/file_a.txt")
        );
        assert_eq!(
            normalize_path(Path::new("already/normal")),
            PathBuf::from("already/normal")
        );
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("file_a.txt"), ".txt");
        assert_eq!(extension_of("ARCHIVE.TAR.GZ"), ".gz");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(".bashrc"), "");
        assert_eq!(extension_of("trailing."), ".");
    }

    #[test]
    fn test_name_of() {
        assert_eq!(name_of(Path::new("/tmp/some_dir")), "some_dir");
        assert_eq!(name_of(Path::new("/")), ".");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(1024), "1.0K");
        assert_eq!(format_size(1536), "1.5K");
        assert_eq!(format_size(1024 * 1024), "1.0M");
        assert_eq!(format_size(1024 * 1024 * 1024), "1.0G");
    }
}
