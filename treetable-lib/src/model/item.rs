//! Leaf payload items.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of an item, unique within its leaf.
pub type ItemId = u64;

/// A row inside a leaf node.
///
/// `done` is the only source of completion truth in a tree; every higher-level
/// completion flag is derived from it.
///
/// Attributes are free-form string fields. In JSON they sit next to `id` and
/// `name` rather than in a nested object, so rows like
/// `{"id": 1, "name": "Sparrow", "habitat": "Urban"}` load directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl Item {
    /// Create an item that is not done and has no attributes.
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            done: false,
            attributes: BTreeMap::new(),
        }
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the done flag.
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Get an attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
