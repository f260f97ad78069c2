//! Key collection for bulk expand/collapse.

use crate::config::SubtreeScope;
use crate::model::{Node, NodePath};

/// Collect the keys of `node` and all of its descendants in pre-order.
///
/// `path` is the key of `node` itself. With [`SubtreeScope::DescendantsOnly`]
/// the first key is dropped; nested levels always contribute their own key.
pub fn subtree_keys(node: &Node, path: &NodePath, scope: SubtreeScope) -> Vec<NodePath> {
    let mut keys = Vec::new();
    if scope == SubtreeScope::IncludeSelf {
        keys.push(path.clone());
    }
    collect_descendants(node.children(), path, &mut keys);
    keys
}

fn collect_descendants(children: &[Node], parent: &NodePath, out: &mut Vec<NodePath>) {
    for child in children {
        let path = parent.child(child.id());
        out.push(path.clone());
        collect_descendants(child.children(), &path, out);
    }
}

/// Keys of every node with something to reveal, for expand-all.
///
/// Groups need children and leaves need items; empty nodes are skipped.
pub fn expandable_keys(nodes: &[Node], parent: &NodePath) -> Vec<NodePath> {
    let mut keys = Vec::new();
    collect_expandable(nodes, parent, &mut keys);
    keys
}

fn collect_expandable(nodes: &[Node], parent: &NodePath, out: &mut Vec<NodePath>) {
    for node in nodes {
        if node.has_content() {
            let path = parent.child(node.id());
            out.push(path.clone());
            collect_expandable(node.children(), &path, out);
        }
    }
}
