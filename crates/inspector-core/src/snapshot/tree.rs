//! Depth-bounded neighborhood trees.

use inspector_protocols::{Document, NodeHandle, TreeNode};

use super::truncate::truncate;

/// Describe `node` and its descendants down to `max_depth` levels (the node
/// itself counts as the first level).
///
/// Returns `None` when the node has no tag or any of its fields cannot be read;
/// such nodes are dropped whole rather than included partially.
pub(crate) fn build_tree(
    document: &dyn Document,
    node: NodeHandle,
    max_depth: usize,
    text_limit: usize,
) -> Option<TreeNode> {
    build_at(document, node, max_depth, 0, text_limit)
}

fn build_at(
    document: &dyn Document,
    node: NodeHandle,
    max_depth: usize,
    depth: usize,
    text_limit: usize,
) -> Option<TreeNode> {
    if depth >= max_depth {
        return None;
    }

    let tag_name = document.tag_name(node)?;
    let id = document.id(node).ok()?;
    let class_name = document.class_name(node).ok()?;
    let (text_content, _) = truncate(&document.text_content(node).ok()?, text_limit);
    let attributes = document.attributes(node).ok()?.into_iter().collect();

    let children = document
        .children(node)
        .into_iter()
        .filter_map(|child| build_at(document, child, max_depth, depth + 1, text_limit))
        .collect();

    Some(TreeNode {
        tag_name,
        id,
        class_name,
        text_content,
        attributes,
        children,
    })
}
