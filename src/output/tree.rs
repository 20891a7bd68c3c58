//! Tree formatter for console output
//!
//! `TreeFormatter` renders a complete `TreeNode` tree with box-drawing
//! connectors, either to a plain string or to stdout with colors.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::tree::{TreeNode, format_size};

use super::config::OutputConfig;

/// Formatter for buffered tree output.
pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render the tree as plain text, followed by a directory/file count footer.
    pub fn format(&self, node: &TreeNode) -> String {
        let mut out = NoColor::new(Vec::new());
        // Writing into a Vec cannot fail
        let _ = self.write_tree(node, &mut out);
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    pub fn print(&self, node: &TreeNode) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_tree(node, &mut stdout)
    }

    fn write_tree<W: WriteColor>(&self, node: &TreeNode, out: &mut W) -> io::Result<()> {
        self.write_node(node, out, "", true, true)?;
        let (dirs, files) = node.count();
        // The root itself is not counted, like tree(1)
        let dirs = if node.is_dir() { dirs - 1 } else { dirs };
        writeln!(out)?;
        writeln!(out, "{} directories, {} files", dirs, files)?;
        Ok(())
    }

    fn write_node<W: WriteColor>(
        &self,
        node: &TreeNode,
        out: &mut W,
        prefix: &str,
        is_last: bool,
        is_root: bool,
    ) -> io::Result<()> {
        if !is_root {
            let connector = if is_last { "└── " } else { "├── " };
            write!(out, "{}{}", prefix, connector)?;
        }

        if node.is_dir() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        }
        write!(out, "{}", node.name())?;
        out.reset()?;
        self.write_annotation(node, out)?;
        writeln!(out)?;

        let children = node.children();
        let new_prefix = if is_root {
            String::new()
        } else if is_last {
            format!("{}    ", prefix)
        } else {
            format!("{}│   ", prefix)
        };
        for (i, child) in children.iter().enumerate() {
            let child_is_last = i == children.len() - 1;
            self.write_node(child, out, &new_prefix, child_is_last, false)?;
        }
        Ok(())
    }

    fn write_annotation<W: WriteColor>(&self, node: &TreeNode, out: &mut W) -> io::Result<()> {
        let (size, mtime) = match node {
            TreeNode::File { size, mtime, .. } => (size, mtime),
            TreeNode::Dir { size, mtime, .. } => (size, mtime),
        };

        let mut parts = Vec::new();
        if self.config.show_size {
            if let Some(bytes) = size {
                parts.push(format_size(*bytes));
            }
        }
        if self.config.show_mtime {
            if let Some(time) = mtime {
                parts.push(time.format("%Y-%m-%d %H:%M").to_string());
            }
        }
        if parts.is_empty() {
            return Ok(());
        }

        out.set_color(ColorSpec::new().set_fg(Some(Color::Black)).set_intense(true))?;
        write!(out, "  [{}]", parts.join(", "))?;
        out.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(name: &str, size: Option<u64>) -> TreeNode {
        TreeNode::File {
            name: name.into(),
            path: PathBuf::from(name),
            node_type: None,
            extension: None,
            size,
            mtime: None,
            ctime: None,
        }
    }

    fn dir(name: &str, children: Vec<TreeNode>) -> TreeNode {
        TreeNode::Dir {
            name: name.into(),
            path: PathBuf::from(name),
            node_type: None,
            size: None,
            mtime: None,
            ctime: None,
            children,
        }
    }

    #[test]
    fn test_format_connectors_and_footer() {
        let tree = dir(
            "root",
            vec![
                file("a.txt", None),
                dir("sub", vec![file("b.txt", None)]),
                file("c.txt", None),
            ],
        );
        let formatter = TreeFormatter::new(OutputConfig::default());
        let expected = "root\n\
                        ├── a.txt\n\
                        ├── sub\n\
                        │   └── b.txt\n\
                        └── c.txt\n\
                        \n\
                        1 directories, 3 files\n";
        assert_eq!(formatter.format(&tree), expected);
    }

    #[test]
    fn test_format_size_annotation() {
        let tree = dir("root", vec![file("big.bin", Some(2048))]);
        let formatter = TreeFormatter::new(OutputConfig::default());
        assert!(formatter.format(&tree).contains("big.bin  [2.0K]"));

        let quiet = TreeFormatter::new(OutputConfig {
            show_size: false,
            ..OutputConfig::default()
        });
        assert!(!quiet.format(&tree).contains("[2.0K]"));
    }

    #[test]
    fn test_format_file_root() {
        let formatter = TreeFormatter::new(OutputConfig::default());
        assert_eq!(
            formatter.format(&file("only.txt", None)),
            "only.txt\n\n0 directories, 1 files\n"
        );
    }
}
