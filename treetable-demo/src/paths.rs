//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "treetable";
const APPLICATION: &str = "treetable-demo";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, where logs live.
///
/// - Linux: `$XDG_CACHE_HOME/treetable-demo` or `~/.cache/treetable-demo`
/// - macOS: `~/Library/Caches/dev.treetable.treetable-demo`
/// - Windows: `C:\Users\<User>\AppData\Local\treetable\treetable-demo\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/treetable-demo` or `~/.config/treetable-demo`
/// - macOS: `~/Library/Application Support/dev.treetable.treetable-demo`
/// - Windows: `C:\Users\<User>\AppData\Roaming\treetable\treetable-demo\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the engine config file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Prefix of archived log files.
const ARCHIVE_PREFIX: &str = "treetable-demo_";

/// File name for a log archived at `timestamp`.
fn archive_name(timestamp: &chrono::DateTime<chrono::Local>) -> String {
    format!("{}{}.log", ARCHIVE_PREFIX, timestamp.format("%Y%m%d_%H%M%S"))
}

/// Move latest.log aside under a timestamped name and prune old archives.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    let latest = cache.join("latest.log");

    if latest.exists() {
        let archived = cache.join(archive_name(&chrono::Local::now()));
        if let Err(e) = fs::rename(&latest, &archived) {
            eprintln!("Failed to archive {}: {}", latest.display(), e);
        }
    }

    prune_archives(&cache);
}

fn prune_archives(cache_dir: &Path) {
    let Ok(entries) = fs::read_dir(cache_dir) else { return };
    let names = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok());

    for name in expired_archives(names, MAX_OLD_LOGS) {
        let _ = fs::remove_file(cache_dir.join(name));
    }
}

/// Archived log names beyond the newest `keep`, oldest first.
///
/// Archive names embed a sortable timestamp, so name order is age order.
/// Files without the archive prefix are never returned.
fn expired_archives(names: impl IntoIterator<Item = String>, keep: usize) -> Vec<String> {
    let mut archives: Vec<String> = names
        .into_iter()
        .filter(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
        .collect();
    archives.sort();
    let expired = archives.len().saturating_sub(keep);
    archives.truncate(expired);
    archives
}
