//! Inline item editing.
//!
//! One item of the selected leaf can be edited at a time:
//!
//! ```text
//! Viewing ──begin_edit──▶ Editing ──save_edit──▶ Viewing (draft committed)
//!                            │
//!                            └──cancel_edit─────▶ Viewing (draft discarded)
//! ```
//!
//! Starting an edit on another item while one is in progress discards the
//! previous draft.

use std::collections::BTreeMap;

use crate::error::EditError;
use crate::model::{Item, ItemId};

/// Field name used for the item name in drafts.
pub const NAME_FIELD: &str = "name";

/// Edit lifecycle of the selected leaf.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    Editing(Draft),
}

impl EditState {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditState::Editing(_))
    }

    /// Id of the item being edited.
    pub fn editing_item(&self) -> Option<ItemId> {
        match self {
            EditState::Editing(draft) => Some(draft.item_id),
            EditState::Viewing => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            EditState::Editing(draft) => Some(draft),
            EditState::Viewing => None,
        }
    }

    pub(crate) fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            EditState::Editing(draft) => Some(draft),
            EditState::Viewing => None,
        }
    }
}

/// Uncommitted field values for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub item_id: ItemId,
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

impl Draft {
    /// Start a draft from the current values of an item.
    pub fn from_item(item: &Item) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            attributes: item.attributes.clone(),
        }
    }

    /// Get a field value.
    pub fn field(&self, field: &str) -> Option<&str> {
        if field == NAME_FIELD {
            return Some(&self.name);
        }
        self.attributes.get(field).map(String::as_str)
    }

    /// Set `name` or an existing attribute.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), EditError> {
        if field == NAME_FIELD {
            self.name = value.into();
            return Ok(());
        }
        match self.attributes.get_mut(field) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(EditError::UnknownField(field.to_string())),
        }
    }

    /// Reject drafts with an empty name or attribute. Whitespace-only values
    /// count as empty.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.name.trim().is_empty() {
            return Err(EditError::EmptyField(NAME_FIELD.to_string()));
        }
        match self.attributes.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((key, _)) => Err(EditError::EmptyField(key.clone())),
            None => Ok(()),
        }
    }

    /// Merge the draft into `item`. Empty draft fields keep the item's value.
    pub fn apply_to(&self, item: &Item) -> Item {
        let mut updated = item.clone();
        if !self.name.is_empty() {
            updated.name = self.name.clone();
        }
        for (key, value) in &self.attributes {
            if !value.is_empty() {
                updated.attributes.insert(key.clone(), value.clone());
            }
        }
        updated
    }
}
