//! Position-dependent node identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The identity of a node inside a [`Tree`](super::Tree).
///
/// A path is the ordered list of node ids from the top-level node down to the
/// node itself. Identity is position-dependent: two nodes that share an id
/// but sit under different parents have different paths, and therefore
/// separate entries in every per-node state map.
///
/// `Display` renders the path in the dash-joined row key form
/// (`-birds-asia-korea`).
///
/// # Example
///
/// ```
/// use treetable_lib::model::NodePath;
///
/// let korea = NodePath::root("birds").child("asia").child("korea");
/// assert_eq!(korea.to_string(), "-birds-asia-korea");
/// assert_eq!(korea.depth(), 2);
/// assert!(NodePath::root("birds").is_ancestor_of(&korea));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<String>);

impl NodePath {
    /// The empty path, parent of every top-level node.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Path of a top-level node.
    pub fn root(id: impl Into<String>) -> Self {
        Self(vec![id.into()])
    }

    /// Build a path from a sequence of ids.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    /// Path of a child of this node.
    pub fn child(&self, id: impl Into<String>) -> Self {
        let mut ids = self.0.clone();
        ids.push(id.into());
        Self(ids)
    }

    /// Path of the parent node, or `None` for the empty path.
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Strict ancestors, nearest first. The empty path is not included.
    pub fn ancestors(&self) -> impl Iterator<Item = NodePath> + '_ {
        (1..self.0.len())
            .rev()
            .map(move |len| Self(self.0[..len].to_vec()))
    }

    /// The last id in the path.
    pub fn id(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// All ids, outermost first.
    pub fn ids(&self) -> &[String] {
        &self.0
    }

    /// Depth of the node (0 = top level). The empty path also reports 0.
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `other` lies strictly below this path.
    pub fn is_ancestor_of(&self, other: &NodePath) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in &self.0 {
            write!(f, "-{}", id)?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for NodePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}
