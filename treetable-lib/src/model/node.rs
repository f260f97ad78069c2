//! Tree node variants.

use super::item::Item;

/// Which variant a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Top-level grouping node.
    Root,
    /// Intermediate grouping node.
    Branch,
    /// Terminal node carrying items.
    Leaf,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Branch => "branch",
            NodeKind::Leaf => "leaf",
        }
    }
}

/// Payload of a `Root` or `Branch` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub children: Vec<Node>,
}

/// Payload of a `Leaf` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub id: String,
    pub name: String,
    pub items: Vec<Item>,
}

impl Leaf {
    /// Find an item by id.
    pub fn item(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// A node in a [`Tree`](super::Tree).
///
/// Only leaves carry items and only roots and branches carry children, so a
/// node is always exactly one of the three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Root(Group),
    Branch(Group),
    Leaf(Leaf),
}

impl Node {
    /// Create a root node.
    pub fn root(id: impl Into<String>, name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Root(Group {
            id: id.into(),
            name: name.into(),
            children,
        })
    }

    /// Create a branch node.
    pub fn branch(id: impl Into<String>, name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Branch(Group {
            id: id.into(),
            name: name.into(),
            children,
        })
    }

    /// Create a leaf node.
    pub fn leaf(id: impl Into<String>, name: impl Into<String>, items: Vec<Item>) -> Self {
        Node::Leaf(Leaf {
            id: id.into(),
            name: name.into(),
            items,
        })
    }

    pub fn id(&self) -> &str {
        match self {
            Node::Root(group) | Node::Branch(group) => &group.id,
            Node::Leaf(leaf) => &leaf.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Root(group) | Node::Branch(group) => &group.name,
            Node::Leaf(leaf) => &leaf.name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Root(_) => NodeKind::Root,
            Node::Branch(_) => NodeKind::Branch,
            Node::Leaf(_) => NodeKind::Leaf,
        }
    }

    /// Child nodes. Leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root(group) | Node::Branch(group) => &group.children,
            Node::Leaf(_) => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(group) | Node::Branch(group) => Some(&mut group.children),
            Node::Leaf(_) => None,
        }
    }

    /// Items of a leaf, `None` for roots and branches.
    pub fn items(&self) -> Option<&[Item]> {
        match self {
            Node::Leaf(leaf) => Some(&leaf.items),
            _ => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub(crate) fn as_leaf_mut(&mut self) -> Option<&mut Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Whether the node has anything to show when expanded.
    pub fn has_content(&self) -> bool {
        match self {
            Node::Root(group) | Node::Branch(group) => !group.children.is_empty(),
            Node::Leaf(leaf) => !leaf.items.is_empty(),
        }
    }
}
