//! JSON output formatting

use std::io;

use crate::tree::TreeNode;

/// Serialize a tree as pretty-printed JSON.
pub fn to_json(node: &TreeNode) -> serde_json::Result<String> {
    serde_json::to_string_pretty(node)
}

/// Print tree node as pretty-printed JSON to stdout.
pub fn print_json(node: &TreeNode) -> io::Result<()> {
    let json = to_json(node).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeType;
    use std::path::PathBuf;

    #[test]
    fn test_to_json_shape() {
        let tree = TreeNode::Dir {
            name: "root".into(),
            path: PathBuf::from("root"),
            node_type: Some(NodeType::Directory),
            size: Some(3),
            mtime: None,
            ctime: None,
            children: vec![TreeNode::File {
                name: "a.txt".into(),
                path: PathBuf::from("root/a.txt"),
                node_type: Some(NodeType::File),
                extension: Some(".txt".into()),
                size: Some(3),
                mtime: None,
                ctime: None,
            }],
        };
        let value: serde_json::Value = serde_json::from_str(&to_json(&tree).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "root",
                "path": "root",
                "type": "directory",
                "size": 3,
                "children": [{
                    "name": "a.txt",
                    "path": "root/a.txt",
                    "type": "file",
                    "extension": ".txt",
                    "size": 3
                }]
            })
        );
    }
}
