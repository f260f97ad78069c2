mod outline;
mod paths;

use std::fs::{self, File};
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use treetable_lib::filter::ProjectFilter;
use treetable_lib::model::{NodePath, Tree};
use treetable_lib::{EngineConfig, TreeError, TreeState, load, sample};

fn init_logging() {
    paths::rotate_logs();
    let path = paths::log_file().unwrap_or_else(|| PathBuf::from("treetable-demo.log"));
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

fn load_config() -> EngineConfig {
    let Some(path) = paths::config_file().filter(|p| p.exists()) else {
        return EngineConfig::default();
    };
    match fs::read_to_string(&path)
        .map_err(TreeError::from)
        .and_then(|json| EngineConfig::from_json(&json).map_err(TreeError::from))
    {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("Ignoring config {}: {}", path.display(), e);
            EngineConfig::default()
        }
    }
}

fn load_tree() -> Result<Tree, TreeError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading tree from {}", path);
            load::from_file(path)
        }
        None => Ok(sample::animals()),
    }
}

fn print_section(title: &str, lines: &[String]) {
    println!("== {} ==", title);
    for line in lines {
        println!("{}", line);
    }
    println!();
}

fn run() -> Result<(), TreeError> {
    let config = load_config();
    let mut state = TreeState::with_config(load_tree()?, config);
    log::info!("Tree state {} ready", state.id());

    print_section("Collapsed", &outline::tree_lines(&state));

    let Some(first) = state.tree().nodes().first().map(|n| NodePath::root(n.id())) else {
        println!("(empty tree)");
        return Ok(());
    };
    state.set_expanded_for_subtree(&first, true);
    print_section("First subtree expanded", &outline::tree_lines(&state));

    // Finish every item of the first leaf and show the propagation.
    if let Some(leaf_path) = state.tree().leaf_paths().into_iter().next() {
        let ids: Vec<u64> = state
            .tree()
            .find_leaf(&leaf_path)
            .map(|leaf| leaf.items.iter().filter(|i| !i.done).map(|i| i.id).collect())
            .unwrap_or_default();
        for id in ids {
            state.toggle_item_done(&leaf_path, id);
        }
        state.select_leaf(&leaf_path);

        if let Some(item_id) = state.selected_leaf().and_then(|l| l.items.first()).map(|i| i.id) {
            match state.begin_edit(item_id) {
                Ok(()) => print_section("Editing", &outline::detail_lines(&state)),
                Err(e) => log::warn!("Cannot edit item {}: {}", item_id, e),
            }
            state.cancel_edit();
        }
        print_section("Leaf finished", &outline::tree_lines(&state));
        print_section("Detail", &outline::detail_lines(&state));
    }

    let mut rng = rand::rng();
    let projects = sample::projects(&mut rng);
    let mut filter = ProjectFilter::new();
    filter.toggle_type("1");
    filter.set_name("project 1");
    let lines: Vec<String> = filter
        .apply(&projects)
        .into_iter()
        .map(outline::project_line)
        .collect();
    print_section(
        &format!("Projects ({} of {})", lines.len(), projects.len()),
        &lines,
    );

    Ok(())
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
