use rand::SeedableRng;
use rand::rngs::StdRng;
use treetable_lib::completion::{Progress, progress, recompute_completion};
use treetable_lib::config::{CompletionStrategy, EngineConfig};
use treetable_lib::model::{Item, Node, NodePath, Tree, update_leaf_items};
use treetable_lib::sample::{self, TreeShape};
use treetable_lib::TreeState;

fn item(id: u64, done: bool) -> Item {
    Item::new(id, format!("item {}", id)).with_done(done)
}

/// r → b → { l: [1], m: m_items }
fn fixture(m_items: Vec<Item>) -> Tree {
    Tree::new(vec![Node::root(
        "r",
        "Root",
        vec![Node::branch(
            "b",
            "Branch",
            vec![
                Node::leaf("l", "L", vec![item(1, false)]),
                Node::leaf("m", "M", m_items),
            ],
        )],
    )])
}

fn path(ids: &[&str]) -> NodePath {
    NodePath::from_ids(ids.iter().copied())
}

// ============================================================================
// Leaf rules
// ============================================================================

#[test]
fn test_leaf_completed_when_all_items_done() {
    let tree = Tree::new(vec![Node::root(
        "r",
        "Root",
        vec![Node::branch(
            "b",
            "Branch",
            vec![
                Node::leaf("all", "All", vec![item(1, true), item(2, true)]),
                Node::leaf("some", "Some", vec![item(3, true), item(4, false)]),
                Node::leaf("none", "None", vec![]),
            ],
        )],
    )]);
    let completed = recompute_completion(&tree);

    assert_eq!(completed.get(&path(&["r", "b", "all"])), Some(&true));
    assert_eq!(completed.get(&path(&["r", "b", "some"])), Some(&false));
    // An empty leaf is never completed.
    assert_eq!(completed.get(&path(&["r", "b", "none"])), Some(&false));
}

// ============================================================================
// Group rules
// ============================================================================

#[test]
fn test_empty_branch_never_completed() {
    let tree = Tree::new(vec![Node::root(
        "r",
        "Root",
        vec![Node::branch("empty", "Empty", vec![])],
    )]);
    let completed = recompute_completion(&tree);

    assert_eq!(completed.get(&path(&["r", "empty"])), Some(&false));
    assert_eq!(completed.get(&path(&["r"])), Some(&false));
}

#[test]
fn test_branch_completed_when_all_children_completed() {
    let tree = fixture(vec![item(2, true)]);
    let tree = update_leaf_items(&tree, &path(&["r", "b", "l"]), vec![item(1, true)]);
    let completed = recompute_completion(&tree);

    assert_eq!(completed.get(&path(&["r", "b"])), Some(&true));
    assert_eq!(completed.get(&path(&["r"])), Some(&true));
}

#[test]
fn test_map_has_entry_for_every_node() {
    let tree = sample::animals();
    let completed = recompute_completion(&tree);
    assert_eq!(completed.len(), tree.node_count());
}

#[test]
fn test_same_id_tracked_per_position() {
    let mut state = TreeState::new(sample::animals());
    let bird_korea = path(&["birds", "asia", "korea"]);
    let mammal_korea = path(&["mammals", "asia", "korea"]);

    state.toggle_item_done(&mammal_korea, 16);
    state.toggle_item_done(&mammal_korea, 17);

    assert!(state.is_completed(&mammal_korea));
    assert!(state.is_completed(&path(&["mammals"])));
    assert!(!state.is_completed(&bird_korea));
    assert!(!state.is_completed(&path(&["birds", "asia"])));
}

// ============================================================================
// Propagation
// ============================================================================

#[test]
fn test_done_toggle_propagates_to_ancestors() {
    let tree = fixture(vec![item(2, true)]);
    let before = recompute_completion(&tree);
    assert_eq!(before.get(&path(&["r", "b", "l"])), Some(&false));
    assert_eq!(before.get(&path(&["r"])), Some(&false));

    let tree = update_leaf_items(&tree, &path(&["r", "b", "l"]), vec![item(1, true)]);
    let after = recompute_completion(&tree);

    assert_eq!(after.get(&path(&["r", "b", "l"])), Some(&true));
    assert_eq!(after.get(&path(&["r", "b"])), Some(&true));
    assert_eq!(after.get(&path(&["r"])), Some(&true));
}

#[test]
fn test_done_toggle_stops_at_incomplete_sibling() {
    let mut state = TreeState::new(fixture(vec![item(2, true), item(3, false)]));

    assert_eq!(state.toggle_item_done(&path(&["r", "b", "l"]), 1), Some(true));

    assert!(state.is_completed(&path(&["r", "b", "l"])));
    assert!(!state.is_completed(&path(&["r", "b", "m"])));
    assert!(!state.is_completed(&path(&["r", "b"])));
    assert!(!state.is_completed(&path(&["r"])));
}

#[test]
fn test_undone_item_clears_ancestors() {
    let mut state = TreeState::new(fixture(vec![item(2, true)]));
    state.toggle_item_done(&path(&["r", "b", "l"]), 1);
    assert!(state.is_completed(&path(&["r"])));

    state.toggle_item_done(&path(&["r", "b", "m"]), 2);

    assert!(!state.is_completed(&path(&["r", "b", "m"])));
    assert!(!state.is_completed(&path(&["r", "b"])));
    assert!(!state.is_completed(&path(&["r"])));
}

#[test]
fn test_toggle_unknown_item_is_none() {
    let mut state = TreeState::new(fixture(vec![]));
    assert_eq!(state.toggle_item_done(&path(&["r", "b", "l"]), 99), None);
    assert_eq!(state.toggle_item_done(&path(&["r", "b"]), 1), None);
}

#[test]
fn test_ancestor_chain_matches_full_recompute() {
    let mut rng = StdRng::seed_from_u64(42);
    let shape = TreeShape {
        roots: 3,
        branch_depth: 2,
        fan_out: 3,
        max_items: 3,
        done_ratio: 0.6,
    };
    let tree = sample::random_tree(&mut rng, shape);
    let config = EngineConfig::new().completion(CompletionStrategy::AncestorChain);
    let mut state = TreeState::with_config(tree, config);

    for leaf in state.tree().leaf_paths() {
        let ids: Vec<u64> = state
            .tree()
            .find_leaf(&leaf)
            .map(|l| l.items.iter().map(|i| i.id).collect())
            .unwrap_or_default();
        for id in ids {
            state.toggle_item_done(&leaf, id);
            assert_eq!(state.completion(), &recompute_completion(state.tree()));
        }
    }
}

// ============================================================================
// Progress
// ============================================================================

#[test]
fn test_progress_counts_subtree_items() {
    let tree = fixture(vec![item(2, true), item(3, false)]);
    let root = tree.find(&path(&["r"])).map(progress);
    assert_eq!(root, Some(Progress { done: 1, total: 3 }));
    assert_eq!(root.and_then(|p| p.percent()), Some(33));
    assert_eq!(Progress::default().percent(), None);
}
