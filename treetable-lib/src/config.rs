//! Engine configuration types.

use serde::Deserialize;

/// Per-engine configuration.
///
/// Every field has a default, so a JSON config file only needs to name the
/// settings it changes.
///
/// # Example
///
/// ```
/// use treetable_lib::config::{CompletionStrategy, EngineConfig, SubtreeScope};
///
/// let config = EngineConfig::new()
///     .subtree_scope(SubtreeScope::DescendantsOnly)
///     .completion(CompletionStrategy::AncestorChain);
/// assert!(config.require_complete_drafts);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether bulk expand/collapse touches the invoking node itself.
    pub subtree_scope: SubtreeScope,

    /// How completion is refreshed after a leaf changes.
    pub completion: CompletionStrategy,

    /// If true, saving an edit with an empty name or attribute is rejected.
    pub require_complete_drafts: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            subtree_scope: SubtreeScope::default(),
            completion: CompletionStrategy::default(),
            require_complete_drafts: true,
        }
    }
}

impl EngineConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bulk expand/collapse scope.
    pub fn subtree_scope(mut self, scope: SubtreeScope) -> Self {
        self.subtree_scope = scope;
        self
    }

    /// Set the completion refresh strategy.
    pub fn completion(mut self, strategy: CompletionStrategy) -> Self {
        self.completion = strategy;
        self
    }

    /// Allow saving drafts with empty fields.
    pub fn allow_incomplete_drafts(mut self) -> Self {
        self.require_complete_drafts = false;
        self
    }

    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Which keys a bulk expand/collapse writes.
///
/// Nested levels below the invoking node always include their own key; this
/// only decides the key of the node the caller passed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtreeScope {
    /// The invoking node and every descendant.
    #[default]
    IncludeSelf,

    /// Every descendant, leaving the invoking node as it was.
    DescendantsOnly,
}

/// How the completion map is brought up to date after a leaf mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStrategy {
    /// Recompute the whole map with a bottom-up pass.
    #[default]
    Full,

    /// Recompute only the mutated leaf and its ancestors.
    AncestorChain,
}
