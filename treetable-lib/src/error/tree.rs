//! Errors for loading and addressing trees

use crate::model::NodePath;

/// Error type for tree loading, validation and strict lookups.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The input was not valid JSON or did not match the tree shape.
    #[error("Failed to parse tree: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading or writing tree data failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tree violates the `Root → Branch → Leaf` shape.
    #[error("Malformed node '{path}': {reason}")]
    Malformed { path: NodePath, reason: String },

    /// No leaf exists at the given path.
    #[error("No leaf at '{0}'")]
    LeafNotFound(NodePath),
}

impl TreeError {
    /// Creates a new malformed node error.
    pub fn malformed(path: NodePath, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path,
            reason: reason.into(),
        }
    }
}
