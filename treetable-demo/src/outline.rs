//! Plain-text rendering of tree state.

use treetable_lib::filter::Project;
use treetable_lib::model::NodeKind;
use treetable_lib::TreeState;

/// Render the visible rows of a tree, one line per row.
pub fn tree_lines(state: &TreeState) -> Vec<String> {
    state
        .visible_rows()
        .into_iter()
        .map(|row| {
            let indent = "  ".repeat(row.depth);
            let icon = match (row.has_content, row.is_expanded) {
                (false, _) => "  ",
                (true, true) => "▼ ",
                (true, false) => "▶ ",
            };
            let check = if row.is_completed { "[x]" } else { "[ ]" };
            let suffix = match (row.kind, state.progress(&row.path)) {
                (NodeKind::Leaf, Some(p)) => format!(" ({} items)", p.total),
                (_, Some(p)) => p
                    .percent()
                    .map(|pct| format!(" {}%", pct))
                    .unwrap_or_default(),
                (_, None) => String::new(),
            };
            format!("{}{}{} {}{}", indent, icon, check, row.name, suffix)
        })
        .collect()
}

/// Render the items of the selected leaf as a table.
pub fn detail_lines(state: &TreeState) -> Vec<String> {
    let Some(leaf) = state.selected_leaf() else {
        return vec!["(no leaf selected)".to_string()];
    };
    let editing = state.edit_state().editing_item();

    let mut lines = vec![format!("{} Items", leaf.name)];
    for item in &leaf.items {
        let marker = if editing == Some(item.id) { "*" } else { " " };
        let done = if item.done { "done" } else { "open" };
        let attributes: Vec<String> = item
            .attributes
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        lines.push(format!(
            "{} #{:<3} {:<20} {:<5} {}",
            marker,
            item.id,
            item.name,
            done,
            attributes.join(", ")
        ));
    }
    lines
}

/// Render one project row.
pub fn project_line(project: &Project) -> String {
    format!(
        "{:<6} {:<18} {:<7} step {} ({}) {}",
        project.id,
        project.name,
        project.priority.label(),
        project.schedule_id(),
        project.current_status().label(),
        project
            .progress
            .map(|p| format!("{}%", p))
            .unwrap_or_else(|| "-".to_string())
    )
}
