//! The tree container and leaf replacement.

use std::collections::HashSet;

use crate::error::TreeError;

use super::item::Item;
use super::node::{Leaf, Node, NodeKind};
use super::path::NodePath;

/// An ordered forest of top-level nodes.
///
/// The shape is `Root → Branch* → Leaf`: top-level nodes are roots, roots
/// contain branches, and branches contain branches or leaves. Well-formedness
/// is a precondition of the engine; [`Tree::validate`] checks it for data
/// coming from outside.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Top-level nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of nodes at every level.
    pub fn node_count(&self) -> usize {
        self.pre_order().len()
    }

    /// Resolve a path to a node.
    pub fn find(&self, path: &NodePath) -> Option<&Node> {
        let (first, rest) = path.ids().split_first()?;
        let mut node = self.nodes.iter().find(|n| n.id() == first)?;
        for id in rest {
            node = node.children().iter().find(|c| c.id() == id)?;
        }
        Some(node)
    }

    fn find_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let (first, rest) = path.ids().split_first()?;
        let mut node = self.nodes.iter_mut().find(|n| n.id() == first)?;
        for id in rest {
            node = node.children_mut()?.iter_mut().find(|c| c.id() == id)?;
        }
        Some(node)
    }

    /// Resolve a path to a leaf.
    pub fn find_leaf(&self, path: &NodePath) -> Option<&Leaf> {
        self.find(path).and_then(Node::as_leaf)
    }

    /// First leaf with the given id in pre-order.
    ///
    /// Leaf ids are only unique among siblings, so prefer [`Tree::find_leaf`]
    /// when the full path is known.
    pub fn find_leaf_by_id(&self, id: &str) -> Option<(NodePath, &Leaf)> {
        self.pre_order()
            .into_iter()
            .find_map(|(path, node)| match node {
                Node::Leaf(leaf) if leaf.id == id => Some((path, leaf)),
                _ => None,
            })
    }

    /// Every node with its path, parents before children.
    pub fn pre_order(&self) -> Vec<(NodePath, &Node)> {
        let mut out = Vec::new();
        Self::collect_pre_order(&self.nodes, &NodePath::empty(), &mut out);
        out
    }

    fn collect_pre_order<'a>(
        nodes: &'a [Node],
        parent: &NodePath,
        out: &mut Vec<(NodePath, &'a Node)>,
    ) {
        for node in nodes {
            let path = parent.child(node.id());
            let children = node.children();
            out.push((path.clone(), node));
            Self::collect_pre_order(children, &path, out);
        }
    }

    /// Paths of every leaf in pre-order.
    pub fn leaf_paths(&self) -> Vec<NodePath> {
        self.pre_order()
            .into_iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(path, _)| path)
            .collect()
    }

    /// Check the `Root → Branch* → Leaf` shape and sibling id uniqueness.
    pub fn validate(&self) -> Result<(), TreeError> {
        Self::validate_level(&self.nodes, &NodePath::empty(), None)
    }

    fn validate_level(
        nodes: &[Node],
        parent: &NodePath,
        parent_kind: Option<NodeKind>,
    ) -> Result<(), TreeError> {
        let mut seen = HashSet::new();
        for node in nodes {
            let path = parent.child(node.id());
            if !seen.insert(node.id()) {
                return Err(TreeError::malformed(path, "duplicate sibling id"));
            }

            let allowed = match parent_kind {
                None => node.kind() == NodeKind::Root,
                Some(NodeKind::Root) => node.kind() == NodeKind::Branch,
                Some(NodeKind::Branch) => node.kind() != NodeKind::Root,
                Some(NodeKind::Leaf) => false,
            };
            if !allowed {
                let reason = match parent_kind {
                    None => format!("{} node at top level", node.kind().as_str()),
                    Some(kind) => format!(
                        "{} node inside {} node",
                        node.kind().as_str(),
                        kind.as_str()
                    ),
                };
                return Err(TreeError::malformed(path, reason));
            }

            match node {
                Node::Leaf(leaf) => {
                    let mut ids = HashSet::new();
                    if let Some(item) = leaf.items.iter().find(|item| !ids.insert(item.id)) {
                        return Err(TreeError::malformed(
                            path,
                            format!("duplicate item id {}", item.id),
                        ));
                    }
                }
                Node::Root(group) | Node::Branch(group) => {
                    Self::validate_level(&group.children, &path, Some(node.kind()))?;
                }
            }
        }
        Ok(())
    }
}

/// Return a tree with the items of the leaf at `path` replaced.
///
/// The input tree is left untouched. A path that does not resolve to a leaf
/// (stale after a reload, or pointing at a group) yields an unchanged copy.
pub fn update_leaf_items(tree: &Tree, path: &NodePath, items: Vec<Item>) -> Tree {
    match try_update_leaf_items(tree, path, items) {
        Ok(updated) => updated,
        Err(err) => {
            log::debug!("[tree] Ignoring leaf update: {}", err);
            tree.clone()
        }
    }
}

/// Like [`update_leaf_items`], but reports a missing leaf.
pub fn try_update_leaf_items(
    tree: &Tree,
    path: &NodePath,
    items: Vec<Item>,
) -> Result<Tree, TreeError> {
    let mut updated = tree.clone();
    let leaf = updated
        .find_mut(path)
        .and_then(Node::as_leaf_mut)
        .ok_or_else(|| TreeError::LeafNotFound(path.clone()))?;
    leaf.items = items;
    Ok(updated)
}
