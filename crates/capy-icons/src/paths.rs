//! XDG application directories.

use std::path::PathBuf;

const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";

/// All directories that may hold `.desktop` files, highest precedence first.
pub fn application_directories() -> Vec<PathBuf> {
    let mut result = Vec::new();

    if let Some(data_home) = dirs::data_dir() {
        result.push(data_home.join("applications"));
    }

    let data_dirs =
        std::env::var("XDG_DATA_DIRS").unwrap_or_else(|_| DEFAULT_DATA_DIRS.to_string());
    result.extend(
        split_data_dirs(&data_dirs)
            .into_iter()
            .map(|dir| dir.join("applications")),
    );

    // App formats (flatpak, snap)
    if let Some(data_home) = dirs::data_dir() {
        result.push(data_home.join("flatpak/exports/share/applications"));
    }
    result.push(PathBuf::from("/var/lib/flatpak/exports/share/applications"));
    result.push(PathBuf::from("/var/lib/snapd/desktop/applications"));

    dedup_preserving_order(result)
}

/// Split a colon separated `XDG_DATA_DIRS` value, skipping empty parts.
pub fn split_data_dirs(raw: &str) -> Vec<PathBuf> {
    raw.split(':')
        .filter(|part| !part.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn dedup_preserving_order(dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::with_capacity(dirs.len());
    for dir in dirs {
        if !out.contains(&dir) {
            out.push(dir);
        }
    }
    out
}
