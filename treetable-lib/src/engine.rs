//! Tree state engine.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::completion::{self, CompletionMap, Progress};
use crate::config::{CompletionStrategy, EngineConfig};
use crate::edit::{Draft, EditState};
use crate::error::EditError;
use crate::expansion;
use crate::model::{self, Item, ItemId, Leaf, Node, NodeKind, NodePath, Tree};

/// Unique identifier for a [`TreeState`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeStateId(usize);

impl TreeStateId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TreeStateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__tree_state_{}", self.0)
    }
}

/// A node as it appears in the flattened, expansion-aware row list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub path: NodePath,
    pub name: String,
    pub kind: NodeKind,
    /// Depth in tree (0 = top level).
    pub depth: usize,
    /// Whether the node has children or items to reveal.
    pub has_content: bool,
    pub is_expanded: bool,
    pub is_completed: bool,
}

/// View state for one tree table.
///
/// `TreeState` owns a [`Tree`] together with everything a tree table needs to
/// render it:
/// - expand/collapse state per node
/// - completion derived from leaf items, refreshed on every mutation
/// - the single selected leaf shown in the detail view
/// - the inline edit lifecycle of the selected leaf's items
///
/// All state is keyed by [`NodePath`], so nodes sharing an id under
/// different parents are tracked independently.
///
/// # Example
///
/// ```
/// use treetable_lib::engine::TreeState;
/// use treetable_lib::model::NodePath;
/// use treetable_lib::sample;
///
/// let mut state = TreeState::new(sample::animals());
/// let birds = NodePath::root("birds");
///
/// state.set_expanded_for_subtree(&birds, true);
/// assert!(state.is_expanded(&birds.child("asia").child("korea")));
///
/// let korea = birds.child("asia").child("korea");
/// assert!(state.select_leaf(&korea));
/// assert_eq!(state.selected_leaf().map(|leaf| leaf.items.len()), Some(4));
/// ```
#[derive(Debug)]
pub struct TreeState {
    id: TreeStateId,
    config: EngineConfig,
    tree: Tree,
    /// Absent keys are collapsed.
    expanded: HashMap<NodePath, bool>,
    completed: CompletionMap,
    selected: Option<NodePath>,
    edit: EditState,
    dirty: bool,
}

impl TreeState {
    /// Create state for a tree with default settings.
    pub fn new(tree: Tree) -> Self {
        Self::with_config(tree, EngineConfig::default())
    }

    /// Create state for a tree with the given settings.
    pub fn with_config(tree: Tree, config: EngineConfig) -> Self {
        let completed = completion::recompute_completion(&tree);
        Self {
            id: TreeStateId::new(),
            config,
            tree,
            expanded: HashMap::new(),
            completed,
            selected: None,
            edit: EditState::Viewing,
            dirty: false,
        }
    }

    pub fn id(&self) -> TreeStateId {
        self.id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Swap in a freshly loaded tree.
    ///
    /// Expansion entries of nodes that still exist are kept; entries of
    /// vanished nodes are pruned. A selection that no longer points at a leaf
    /// is dropped along with any edit in progress, and an edit whose item is
    /// gone from the surviving leaf is discarded.
    pub fn replace_tree(&mut self, tree: Tree) {
        self.tree = tree;
        self.completed = completion::recompute_completion(&self.tree);

        let before = self.expanded.len();
        let tree = &self.tree;
        self.expanded.retain(|path, _| tree.find(path).is_some());
        if self.expanded.len() < before {
            log::debug!(
                "[engine] Pruned {} expansion entries after reload",
                before - self.expanded.len()
            );
        }

        if let Some(path) = &self.selected
            && self.tree.find_leaf(path).is_none()
        {
            log::debug!("[engine] Selected leaf {} gone after reload", path);
            self.selected = None;
            self.edit = EditState::Viewing;
        }
        self.drop_stale_edit();
        self.dirty = true;
    }

    /// Discard an edit whose item no longer exists in the selected leaf.
    fn drop_stale_edit(&mut self) {
        if let Some(item_id) = self.edit.editing_item()
            && self.selected_leaf().and_then(|leaf| leaf.item(item_id)).is_none()
        {
            log::debug!("[engine] Item {} gone, discarding draft", item_id);
            self.edit = EditState::Viewing;
        }
    }

    // -------------------------------------------------------------------------
    // Expand/Collapse
    // -------------------------------------------------------------------------

    /// Flip the expanded flag of one node. Returns the new value.
    pub fn toggle_expanded(&mut self, path: &NodePath) -> bool {
        let entry = self.expanded.entry(path.clone()).or_insert(false);
        *entry = !*entry;
        self.dirty = true;
        *entry
    }

    /// Check if a node is expanded.
    pub fn is_expanded(&self, path: &NodePath) -> bool {
        self.expanded.get(path).copied().unwrap_or(false)
    }

    /// Set the expanded flag of one node.
    pub fn set_expanded(&mut self, path: &NodePath, expand: bool) {
        self.expanded.insert(path.clone(), expand);
        self.dirty = true;
    }

    /// Expand or collapse a node and everything below it.
    ///
    /// Entries are overwritten, not flipped. Whether the node's own key is
    /// written depends on [`EngineConfig::subtree_scope`]. Returns the keys
    /// that were written; an unknown path writes nothing.
    pub fn set_expanded_for_subtree(&mut self, path: &NodePath, expand: bool) -> Vec<NodePath> {
        let Some(node) = self.tree.find(path) else {
            log::debug!("[engine] Bulk expand target {} not found", path);
            return Vec::new();
        };
        let keys = expansion::subtree_keys(node, path, self.config.subtree_scope);
        for key in &keys {
            self.expanded.insert(key.clone(), expand);
        }
        log::debug!(
            "[engine] {} {} keys under {}",
            if expand { "Expanded" } else { "Collapsed" },
            keys.len(),
            path
        );
        self.dirty = true;
        keys
    }

    /// Expand every node that has children or items.
    pub fn expand_all(&mut self) {
        for key in expansion::expandable_keys(self.tree.nodes(), &NodePath::empty()) {
            self.expanded.insert(key, true);
        }
        self.dirty = true;
    }

    /// Collapse all nodes.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        self.dirty = true;
    }

    /// Paths currently marked expanded, sorted.
    pub fn expanded_paths(&self) -> Vec<NodePath> {
        let mut paths: Vec<NodePath> = self
            .expanded
            .iter()
            .filter(|(_, expanded)| **expanded)
            .map(|(path, _)| path.clone())
            .collect();
        paths.sort();
        paths
    }

    /// Flatten the tree into the rows a table would show.
    ///
    /// Children appear only below expanded nodes.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        self.collect_visible(self.tree.nodes(), &NodePath::empty(), &mut rows);
        rows
    }

    fn collect_visible(&self, nodes: &[Node], parent: &NodePath, out: &mut Vec<VisibleRow>) {
        for node in nodes {
            let path = parent.child(node.id());
            let is_expanded = self.is_expanded(&path);
            out.push(VisibleRow {
                name: node.name().to_string(),
                kind: node.kind(),
                depth: path.depth(),
                has_content: node.has_content(),
                is_expanded,
                is_completed: self.is_completed(&path),
                path: path.clone(),
            });
            if is_expanded {
                self.collect_visible(node.children(), &path, out);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Completion
    // -------------------------------------------------------------------------

    /// Check if a node is completed. Unknown paths are not.
    pub fn is_completed(&self, path: &NodePath) -> bool {
        self.completed.get(path).copied().unwrap_or(false)
    }

    /// The full completion map.
    pub fn completion(&self) -> &CompletionMap {
        &self.completed
    }

    /// Done and total item counts below a node.
    pub fn progress(&self, path: &NodePath) -> Option<Progress> {
        self.tree.find(path).map(completion::progress)
    }

    fn refresh_completion(&mut self, changed: &NodePath) {
        match self.config.completion {
            CompletionStrategy::Full => {
                self.completed = completion::recompute_completion(&self.tree);
            }
            CompletionStrategy::AncestorChain => {
                if !completion::refresh_ancestor_chain(&self.tree, &mut self.completed, changed) {
                    self.completed = completion::recompute_completion(&self.tree);
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Leaf mutation
    // -------------------------------------------------------------------------

    /// Replace the items of a leaf and refresh completion.
    ///
    /// Returns false, leaving everything untouched, when no leaf exists at
    /// `path`.
    pub fn set_leaf_items(&mut self, path: &NodePath, items: Vec<Item>) -> bool {
        if self.tree.find_leaf(path).is_none() {
            log::debug!("[engine] No leaf at {}, items not replaced", path);
            return false;
        }
        self.tree = model::update_leaf_items(&self.tree, path, items);
        self.refresh_completion(path);

        if self.selected.as_ref() == Some(path) {
            self.drop_stale_edit();
        }
        self.dirty = true;
        true
    }

    /// Flip the done flag of one item. Returns the new value.
    pub fn toggle_item_done(&mut self, path: &NodePath, item_id: ItemId) -> Option<bool> {
        let leaf = self.tree.find_leaf(path)?;
        let mut done = None;
        let items = leaf
            .items
            .iter()
            .map(|item| {
                if item.id == item_id {
                    done = Some(!item.done);
                    item.clone().with_done(!item.done)
                } else {
                    item.clone()
                }
            })
            .collect();
        let done = done?;
        self.set_leaf_items(path, items);
        Some(done)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Make a leaf the active detail-view leaf.
    ///
    /// Any edit in progress is discarded, even when re-selecting the same
    /// leaf. Paths that are not leaves are ignored and return false.
    pub fn select_leaf(&mut self, path: &NodePath) -> bool {
        if self.tree.find_leaf(path).is_none() {
            log::debug!("[engine] Cannot select {}: not a leaf", path);
            return false;
        }
        self.selected = Some(path.clone());
        self.edit = EditState::Viewing;
        self.dirty = true;
        true
    }

    /// Clear the selection and any edit in progress.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.edit = EditState::Viewing;
        self.dirty = true;
    }

    pub fn selected_path(&self) -> Option<&NodePath> {
        self.selected.as_ref()
    }

    /// The selected leaf with its current items.
    pub fn selected_leaf(&self) -> Option<&Leaf> {
        self.selected
            .as_ref()
            .and_then(|path| self.tree.find_leaf(path))
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Start editing an item of the selected leaf.
    ///
    /// An edit already in progress, on this or another item, is discarded.
    pub fn begin_edit(&mut self, item_id: ItemId) -> Result<(), EditError> {
        let leaf = self.selected_leaf().ok_or(EditError::NoSelection)?;
        let item = leaf.item(item_id).ok_or(EditError::ItemNotFound(item_id))?;
        let draft = Draft::from_item(item);
        if let Some(previous) = self.edit.editing_item() {
            log::debug!("[engine] Discarding draft for item {}", previous);
        }
        self.edit = EditState::Editing(draft);
        self.dirty = true;
        Ok(())
    }

    /// Change one field of the current draft.
    pub fn set_draft_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), EditError> {
        let draft = self.edit.draft_mut().ok_or(EditError::NotEditing)?;
        draft.set_field(field, value)?;
        self.dirty = true;
        Ok(())
    }

    /// Commit the current draft to the tree.
    ///
    /// With [`EngineConfig::require_complete_drafts`] set, a draft with an
    /// empty field is rejected and the edit stays open. Returns the saved
    /// item.
    pub fn save_edit(&mut self) -> Result<Item, EditError> {
        let draft = self.edit.draft().ok_or(EditError::NotEditing)?;
        if self.config.require_complete_drafts {
            draft.validate()?;
        }
        let path = self.selected.clone().ok_or(EditError::NoSelection)?;
        let leaf = self.tree.find_leaf(&path).ok_or(EditError::NoSelection)?;
        let item_id = draft.item_id;
        if leaf.item(item_id).is_none() {
            return Err(EditError::ItemNotFound(item_id));
        }

        let items: Vec<Item> = leaf
            .items
            .iter()
            .map(|item| {
                if item.id == item_id {
                    draft.apply_to(item)
                } else {
                    item.clone()
                }
            })
            .collect();
        let saved = items
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
            .ok_or(EditError::ItemNotFound(item_id))?;

        self.set_leaf_items(&path, items);
        self.edit = EditState::Viewing;
        log::debug!("[engine] Saved item {} in {}", item_id, path);
        Ok(saved)
    }

    /// Discard the current draft. Returns false if nothing was being edited.
    pub fn cancel_edit(&mut self) -> bool {
        if !self.edit.is_editing() {
            return false;
        }
        self.edit = EditState::Viewing;
        self.dirty = true;
        true
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the state has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
