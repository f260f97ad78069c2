use treetable_lib::config::EngineConfig;
use treetable_lib::edit::EditState;
use treetable_lib::model::{Item, Node, NodePath, Tree};
use treetable_lib::sample;
use treetable_lib::{EditError, TreeState};

fn korea() -> NodePath {
    NodePath::from_ids(["birds", "asia", "korea"])
}

fn japan() -> NodePath {
    NodePath::from_ids(["birds", "asia", "japan"])
}

/// The animal catalogue after a reload that dropped Japan and all Korean
/// birds except the sparrow.
fn reloaded_animals() -> Tree {
    Tree::new(vec![
        Node::root(
            "birds",
            "Birds",
            vec![Node::branch(
                "asia",
                "Asia",
                vec![Node::leaf("korea", "Korea", vec![Item::new(1, "Sparrow")])],
            )],
        ),
        Node::root(
            "mammals",
            "Mammals",
            vec![Node::branch(
                "asia",
                "Asia",
                vec![Node::leaf("korea", "Korea", vec![Item::new(16, "Korean Water Deer")])],
            )],
        ),
    ])
}

fn item_name(state: &TreeState, path: &NodePath, id: u64) -> Option<String> {
    state
        .tree()
        .find_leaf(path)
        .and_then(|leaf| leaf.item(id))
        .map(|item| item.name.clone())
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_select_leaf_sets_single_selection() {
    let mut state = TreeState::new(sample::animals());
    assert!(state.select_leaf(&korea()));
    assert!(state.select_leaf(&japan()));

    assert_eq!(state.selected_path(), Some(&japan()));
    assert_eq!(state.selected_leaf().map(|leaf| leaf.name.as_str()), Some("Japan"));
}

#[test]
fn test_select_non_leaf_is_ignored() {
    let mut state = TreeState::new(sample::animals());
    state.select_leaf(&korea());

    assert!(!state.select_leaf(&NodePath::from_ids(["birds", "asia"])));
    assert!(!state.select_leaf(&NodePath::root("fish")));
    assert_eq!(state.selected_path(), Some(&korea()));
}

#[test]
fn test_select_leaf_clears_edit() {
    let mut state = TreeState::new(sample::animals());
    state.select_leaf(&korea());
    state.begin_edit(1).expect("item 1 exists");

    state.select_leaf(&japan());

    assert_eq!(state.edit_state(), &EditState::Viewing);
}

#[test]
fn test_clear_selection() {
    let mut state = TreeState::new(sample::animals());
    state.select_leaf(&korea());
    state.begin_edit(2).expect("item 2 exists");

    state.clear_selection();

    assert!(state.selected_path().is_none());
    assert!(!state.edit_state().is_editing());
}

// ============================================================================
// Edit lifecycle
// ============================================================================

#[test]
fn test_begin_edit_requires_selection() {
    let mut state = TreeState::new(sample::animals());
    assert_eq!(state.begin_edit(1), Err(EditError::NoSelection));

    state.select_leaf(&korea());
    assert_eq!(state.begin_edit(6), Err(EditError::ItemNotFound(6)));
}

#[test]
fn test_save_commits_draft() {
    let mut state = TreeState::new(sample::animals());
    state.select_leaf(&korea());
    state.begin_edit(1).expect("item 1 exists");
    state.set_draft_field("name", "House Sparrow").expect("name is editable");
    state.set_draft_field("habitat", "Cities").expect("habitat is editable");

    let saved = state.save_edit().expect("draft is complete");

    assert_eq!(saved.name, "House Sparrow");
    assert_eq!(saved.attribute("habitat"), Some("Cities"));
    assert_eq!(saved.attribute("population"), Some("Abundant"));
    assert_eq!(item_name(&state, &korea(), 1).as_deref(), Some("House Sparrow"));
    assert_eq!(state.edit_state(), &EditState::Viewing);
}

#[test]
fn test_cancel_discards_draft() {
    let mut state = TreeState::new(sample::animals());
    state.select_leaf(&korea());
    state.begin_edit(2).expect("item 2 exists");
    state.set_draft_field("name", "Blue Magpie").expect("name is editable");

    assert!(state.cancel_edit());

    assert_eq!(item_name(&state, &korea(), 2).as_deref(), Some("Magpie"));
    assert!(!state.cancel_edit());
}

#[test]
fn test_starting_second_edit_discards_first() {
    let mut state = TreeState::new(sample::animals());
    state.select_leaf(&korea());
    state.begin_edit(1).expect("item 1 exists");
    state.set_draft_field("name", "Unsaved").expect("name is editable");

    state.begin_edit(2).expect("item 2 exists");

    assert_eq!(state.edit_state().editing_item(), Some(2));
    let draft = state.edit_state().draft().expect("editing item 2");
    assert_eq!(draft.name, "Magpie");

    state.save_edit().expect("draft is complete");
    assert_eq!(item_name(&state, &korea(), 1).as_deref(), Some("Sparrow"));
}

#[test]
fn test_restarting_same_item_resets_draft() {
    let mut state = TreeState::new(sample::animals());
    state.select_leaf(&korea());
    state.begin_edit(3).expect("item 3 exists");
    state.set_draft_field("name", "Raven").expect("name is editable");

    state.begin_edit(3).expect("item 3 exists");

    let draft = state.edit_state().draft().expect("editing item 3");
    assert_eq!(draft.name, "Korean Crow");
}

#[test]
fn test_empty_field_rejected_and_edit_stays_open() {
    let mut state = TreeState::new(sample::animals());
    state.select_leaf(&korea());
    state.begin_edit(4).expect("item 4 exists");
    state.set_draft_field("conservation", "  ").expect("field exists");

    assert_eq!(
        state.save_edit(),
        Err(EditError::EmptyField("conservation".to_string()))
    );
    assert_eq!(state.edit_state().editing_item(), Some(4));
}

#[test]
fn test_incomplete_draft_keeps_old_values_when_allowed() {
    let config = EngineConfig::new().allow_incomplete_drafts();
    let mut state = TreeState::with_config(sample::animals(), config);
    state.select_leaf(&korea());
    state.begin_edit(4).expect("item 4 exists");
    state.set_draft_field("name", "").expect("name is editable");

    let saved = state.save_edit().expect("validation disabled");
    assert_eq!(saved.name, "Oriental Stork");
}

#[test]
fn test_unknown_field_and_not_editing() {
    let mut state = TreeState::new(sample::animals());
    assert_eq!(state.set_draft_field("name", "x"), Err(EditError::NotEditing));
    assert_eq!(state.save_edit(), Err(EditError::NotEditing));

    state.select_leaf(&korea());
    state.begin_edit(1).expect("item 1 exists");
    assert_eq!(
        state.set_draft_field("wingspan", "20cm"),
        Err(EditError::UnknownField("wingspan".to_string()))
    );
}

#[test]
fn test_save_keeps_done_flag_and_completion() {
    let mut state = TreeState::new(sample::animals());
    let japan = japan();
    state.toggle_item_done(&japan, 6);
    state.toggle_item_done(&japan, 7);
    assert!(state.is_completed(&japan));

    state.select_leaf(&japan);
    state.begin_edit(6).expect("item 6 exists");
    state.set_draft_field("habitat", "Gardens").expect("field exists");
    let saved = state.save_edit().expect("draft is complete");

    assert!(saved.done);
    assert!(state.is_completed(&japan));
}

// ============================================================================
// Leaf replacement
// ============================================================================

#[test]
fn test_replacing_items_drops_stale_edit() {
    let mut state = TreeState::new(sample::animals());
    state.select_leaf(&korea());
    state.begin_edit(4).expect("item 4 exists");

    assert!(state.set_leaf_items(&korea(), vec![Item::new(1, "Sparrow")]));

    assert!(!state.edit_state().is_editing());
    assert_eq!(state.selected_leaf().map(|leaf| leaf.items.len()), Some(1));
}

#[test]
fn test_replace_tree_drops_missing_selection() {
    let mut state = TreeState::new(sample::animals());
    state.select_leaf(&japan());
    state.begin_edit(6).expect("item 6 exists");

    state.replace_tree(reloaded_animals());

    assert!(state.selected_path().is_none());
    assert!(!state.edit_state().is_editing());
}

#[test]
fn test_replace_tree_drops_edit_of_missing_item() {
    let mut state = TreeState::new(sample::animals());
    state.select_leaf(&korea());
    state.begin_edit(4).expect("item 4 exists");

    state.replace_tree(reloaded_animals());

    assert_eq!(state.selected_path(), Some(&korea()));
    assert_eq!(state.edit_state(), &EditState::Viewing);
    assert_eq!(state.save_edit(), Err(EditError::NotEditing));
}

#[test]
fn test_replace_tree_keeps_edit_of_surviving_item() {
    let mut state = TreeState::new(sample::animals());
    state.select_leaf(&korea());
    state.begin_edit(1).expect("item 1 exists");
    state.set_draft_field("name", "House Sparrow").expect("name is editable");

    state.replace_tree(reloaded_animals());

    assert_eq!(state.edit_state().editing_item(), Some(1));
    let saved = state.save_edit().expect("draft is complete");
    assert_eq!(saved.name, "House Sparrow");
    assert_eq!(item_name(&state, &korea(), 1).as_deref(), Some("House Sparrow"));
}

#[test]
fn test_replace_tree_prunes_vanished_expansion() {
    let mut state = TreeState::new(sample::animals());
    state.expand_all();
    assert!(state.is_expanded(&japan()));

    state.replace_tree(reloaded_animals());

    assert!(state.is_expanded(&NodePath::root("birds")));
    assert!(state.is_expanded(&korea()));
    assert!(!state.is_expanded(&japan()));
    assert!(!state.expanded_paths().contains(&japan()));
    assert!(
        state
            .expanded_paths()
            .iter()
            .all(|path| state.tree().find(path).is_some())
    );
}
