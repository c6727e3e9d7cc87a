//! Pinned shortcut store.
//!
//! Shortcuts pinned to the launcher are kept in a JSON file keyed by profile
//! id, typically `~/.local/share/CapyShell/pinned_shortcuts.json`:
//!
//! ```json
//! { "0": [ { "package": "org.gnome.Calendar", "id": "new-event" } ] }
//! ```

use capy_icons::{ShortcutManager, ShortcutRef, UserProfile};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedShortcut {
    pub package: String,
    pub id: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinnedShortcutStore {
    by_profile: HashMap<u32, Vec<PinnedShortcut>>,
}

impl PinnedShortcutStore {
    /// Default location of the store.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("CapyShell").join("pinned_shortcuts.json"))
    }

    /// Load from file, or return an empty store if missing or unreadable.
    pub fn load(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("Ignoring pinned shortcuts in {}: {}", path.display(), e);
            Self::default()
        })
    }
}

impl ShortcutManager for PinnedShortcutStore {
    fn query_pinned(&self, package: &str, profile: UserProfile) -> Vec<ShortcutRef> {
        self.by_profile
            .get(&profile.0)
            .map(|pinned| {
                pinned
                    .iter()
                    .filter(|s| s.package == package)
                    .map(|s| ShortcutRef {
                        package: s.package.clone(),
                        id: s.id.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
