//! Depth-bounded DOM neighborhood.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One element in a captured neighborhood tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub tag_name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub text_content: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Levels below this node (a leaf has depth 0).
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }
}

/// Current element, its parent and its siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DomTree {
    pub current: Option<TreeNode>,
    pub parent: Option<TreeNode>,
    #[serde(default)]
    pub siblings: Vec<TreeNode>,
}
