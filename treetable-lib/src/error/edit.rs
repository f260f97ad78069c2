//! EditError for the inline item editor

use crate::model::ItemId;

/// Error type for inline edit operations on the selected leaf.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Editing requires a selected leaf.
    #[error("No leaf is selected")]
    NoSelection,

    /// The selected leaf has no item with this id.
    #[error("Item {0} not found in the selected leaf")]
    ItemNotFound(ItemId),

    /// There is no edit in progress.
    #[error("No edit in progress")]
    NotEditing,

    /// A draft field is empty and drafts must be complete.
    #[error("Field '{0}' must not be empty")]
    EmptyField(String),

    /// The field is neither `name` nor an attribute of the item.
    #[error("Unknown field '{0}'")]
    UnknownField(String),
}
