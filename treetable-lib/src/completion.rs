//! Derived completion status.
//!
//! A leaf is completed when it has at least one item and every item is done.
//! A root or branch is completed when it has at least one child and every
//! child is completed. Empty nodes are never completed.

use std::collections::HashMap;

use crate::model::{Node, NodePath, Tree};

/// Completion flag for every node, keyed by path.
pub type CompletionMap = HashMap<NodePath, bool>;

/// Recompute completion for the whole tree with a bottom-up pass.
pub fn recompute_completion(tree: &Tree) -> CompletionMap {
    let mut completed = CompletionMap::new();
    for node in tree.nodes() {
        fold(node, &NodePath::root(node.id()), &mut completed);
    }
    completed
}

fn fold(node: &Node, path: &NodePath, completed: &mut CompletionMap) -> bool {
    let done = match node {
        Node::Leaf(leaf) => !leaf.items.is_empty() && leaf.items.iter().all(|item| item.done),
        Node::Root(group) | Node::Branch(group) => {
            // Every child needs an entry, so no short-circuit here.
            let results: Vec<bool> = group
                .children
                .iter()
                .map(|child| fold(child, &path.child(child.id()), completed))
                .collect();
            !results.is_empty() && results.into_iter().all(|c| c)
        }
    };
    completed.insert(path.clone(), done);
    done
}

/// Refresh the entries of a mutated leaf and its ancestors in place.
///
/// Sibling entries are trusted as they are, so `completed` must be up to date
/// for everything outside the ancestor chain. Returns false when `leaf_path`
/// does not resolve to a node.
pub fn refresh_ancestor_chain(
    tree: &Tree,
    completed: &mut CompletionMap,
    leaf_path: &NodePath,
) -> bool {
    let Some(node) = tree.find(leaf_path) else {
        log::debug!("[completion] No node at {}, skipping refresh", leaf_path);
        return false;
    };
    fold(node, leaf_path, completed);

    for ancestor in leaf_path.ancestors() {
        let Some(node) = tree.find(&ancestor) else {
            return false;
        };
        let children = node.children();
        let done = !children.is_empty()
            && children.iter().all(|child| {
                completed
                    .get(&ancestor.child(child.id()))
                    .copied()
                    .unwrap_or(false)
            });
        completed.insert(ancestor, done);
    }
    true
}

/// Item counts below a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Done items as a whole percentage, `None` when there are no items.
    pub fn percent(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        Some((self.done * 100 / self.total) as u8)
    }
}

/// Count done and total items in the subtree rooted at `node`.
pub fn progress(node: &Node) -> Progress {
    match node {
        Node::Leaf(leaf) => Progress {
            done: leaf.items.iter().filter(|item| item.done).count(),
            total: leaf.items.len(),
        },
        Node::Root(group) | Node::Branch(group) => {
            group
                .children
                .iter()
                .map(progress)
                .fold(Progress::default(), |acc, p| Progress {
                    done: acc.done + p.done,
                    total: acc.total + p.total,
                })
        }
    }
}
