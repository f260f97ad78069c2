//! JSON loading and saving of trees.
//!
//! The format mirrors the node shapes directly: a node with `children` is a
//! group, a node with `items` is a leaf. Top-level groups load as roots and
//! nested groups as branches.
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": "birds", "name": "Birds", "children": [
//!       { "id": "asia", "name": "Asia", "children": [
//!         { "id": "korea", "name": "Korea", "items": [
//!           { "id": 1, "name": "Sparrow", "habitat": "Urban", "done": true }
//!         ] }
//!       ] }
//!     ] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::model::{Group, Item, Leaf, Node, NodePath, Tree};

#[derive(Debug, Serialize, Deserialize)]
struct RawTree {
    nodes: Vec<RawNode>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawNode {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<RawNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<Item>>,
}

impl RawNode {
    fn into_node(self, parent: &NodePath) -> Result<Node, TreeError> {
        let path = parent.child(&self.id);
        match (self.children, self.items) {
            (Some(_), Some(_)) => Err(TreeError::malformed(path, "node has both children and items")),
            (None, None) => Err(TreeError::malformed(path, "node has neither children nor items")),
            (None, Some(items)) => Ok(Node::Leaf(Leaf {
                id: self.id,
                name: self.name,
                items,
            })),
            (Some(children), None) => {
                let children = children
                    .into_iter()
                    .map(|child| child.into_node(&path))
                    .collect::<Result<Vec<_>, _>>()?;
                let group = Group {
                    id: self.id,
                    name: self.name,
                    children,
                };
                if parent.is_empty() {
                    Ok(Node::Root(group))
                } else {
                    Ok(Node::Branch(group))
                }
            }
        }
    }

    fn from_node(node: &Node) -> Self {
        match node {
            Node::Root(group) | Node::Branch(group) => Self {
                id: group.id.clone(),
                name: group.name.clone(),
                children: Some(group.children.iter().map(Self::from_node).collect()),
                items: None,
            },
            Node::Leaf(leaf) => Self {
                id: leaf.id.clone(),
                name: leaf.name.clone(),
                children: None,
                items: Some(leaf.items.clone()),
            },
        }
    }
}

/// Parse and validate a tree from JSON.
pub fn from_json(json: &str) -> Result<Tree, TreeError> {
    let raw: RawTree = serde_json::from_str(json)?;
    let root = NodePath::empty();
    let nodes = raw
        .nodes
        .into_iter()
        .map(|node| node.into_node(&root))
        .collect::<Result<Vec<_>, _>>()?;
    let tree = Tree::new(nodes);
    tree.validate()?;
    log::debug!("[load] Loaded tree with {} nodes", tree.node_count());
    Ok(tree)
}

/// Read a tree from a JSON file.
pub fn from_file(path: impl AsRef<Path>) -> Result<Tree, TreeError> {
    let json = fs::read_to_string(path)?;
    from_json(&json)
}

/// Serialize a tree to pretty-printed JSON.
pub fn to_json(tree: &Tree) -> Result<String, TreeError> {
    let raw = RawTree {
        nodes: tree.nodes().iter().map(RawNode::from_node).collect(),
    };
    Ok(serde_json::to_string_pretty(&raw)?)
}
