//! Provider configuration file.
//!
//! Stored in `~/.config/CapyShell/icons.json`. Every field is optional; a
//! missing file means defaults.
//!
//! The default owner is the Android calendar package, which no desktop file
//! provides. To get day icons from an installed app, list its desktop id
//! together with the key its `.desktop` file uses for the day table:
//!
//! ```json
//! {
//!   "owners": [
//!     { "package": "org.gnome.Calendar", "table_key": "X-CapyShell-DayIcons" }
//!   ]
//! }
//! ```
//!
//! with `/usr/share/applications/org.gnome.Calendar.desktop` carrying
//! `X-CapyShell-DayIcons=cal-01;cal-02;...;cal-31;` in its `[Desktop Entry]`.

use crate::error::{IconError, Result};
use crate::owners::{DynamicOwner, OwnerPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the configured provider id.
pub const PROVIDER_ENV: &str = "CAPY_ICON_PROVIDER";

/// Time change monitor settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub poll_interval_secs: u64,
    /// Wall clock drift beyond this is reported as a manual time change.
    pub clock_jump_tolerance_secs: u64,
    pub watch_timezone: bool,
    pub timezone_path: PathBuf,
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn clock_jump_tolerance(&self) -> Duration {
        Duration::from_secs(self.clock_jump_tolerance_secs)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            clock_jump_tolerance_secs: 5,
            watch_timezone: true,
            timezone_path: PathBuf::from("/etc/localtime"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Provider id; `None` or empty selects the default provider.
    pub provider: Option<String>,
    /// Packages with day-indexed icons. Empty disables overrides.
    pub owners: Vec<DynamicOwner>,
    pub monitor: MonitorConfig,
    /// JSON file of pinned shortcuts per profile.
    pub pinned_shortcuts_path: Option<PathBuf>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            provider: None,
            owners: vec![DynamicOwner::calendar()],
            monitor: MonitorConfig::default(),
            pinned_shortcuts_path: None,
        }
    }
}

impl IconConfig {
    /// `$XDG_CONFIG_HOME/CapyShell/icons.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("CapyShell").join("icons.json"))
    }

    /// Load from `path`. A missing file yields the defaults, an unreadable or
    /// malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map_err(|e| IconError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Provider id, with `CAPY_ICON_PROVIDER` taking precedence.
    pub fn provider_id(&self) -> Option<String> {
        std::env::var(PROVIDER_ENV)
            .ok()
            .filter(|id| !id.trim().is_empty())
            .or_else(|| self.provider.clone())
    }

    pub fn owner_policy(&self) -> OwnerPolicy {
        OwnerPolicy::new(self.owners.iter().cloned())
    }
}
