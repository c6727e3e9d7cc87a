//! Desktop entry parsing.

use crate::host::ApplicationEntry;
use crate::types::{ComponentName, IconHandle, IconSource};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const FALLBACK_ICON: &str = "application-x-executable";
const EXTENSION_PREFIX: &str = "X-";

/// Parsed from .desktop files.
#[derive(Clone, Debug, PartialEq)]
pub struct DesktopApp {
    /// Desktop file name, e.g. "org.gnome.Calendar.desktop".
    pub id: String,
    pub component: ComponentName,
    pub name: String,
    pub exec: String,
    pub icon_name: Option<String>,
    pub no_display: bool,
    /// Vendor extension keys (`X-...`), raw values.
    pub extensions: HashMap<String, String>,
    pub desktop_file_path: PathBuf,
}

impl DesktopApp {
    /// Package name: the desktop id without its extension.
    pub fn package(&self) -> &str {
        &self.component.package
    }
}

impl ApplicationEntry for DesktopApp {
    fn component(&self) -> &ComponentName {
        &self.component
    }

    fn default_icon(&self, density: u32) -> IconHandle {
        let name = self.icon_name.as_deref().unwrap_or(FALLBACK_ICON);
        IconHandle::new(icon_source(name), density)
    }
}

/// Absolute paths are files, everything else is a theme icon name.
pub fn icon_source(name: &str) -> IconSource {
    if name.starts_with('/') {
        IconSource::File(PathBuf::from(name))
    } else {
        IconSource::Themed(name.to_string())
    }
}

/// Parse a .desktop file into a DesktopApp struct.
pub fn parse_desktop_file(path: &Path) -> Option<DesktopApp> {
    let content = fs::read_to_string(path).ok()?;
    let id = path.file_name()?.to_string_lossy().to_string();
    parse_desktop_entry(&id, &content, path)
}

/// Parse the `[Desktop Entry]` group of `content`. Only `Type=Application`
/// entries with a name and an exec line are accepted.
pub fn parse_desktop_entry(id: &str, content: &str, path: &Path) -> Option<DesktopApp> {
    let mut entries = HashMap::new();
    let mut in_desktop_entry = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            in_desktop_entry = line == "[Desktop Entry]";
            continue;
        }

        if in_desktop_entry {
            if let Some((key, value)) = line.split_once('=') {
                entries.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }

    if entries.get("Type").map(String::as_str) != Some("Application") {
        return None;
    }

    let name = entries.get("Name")?.clone();
    let exec = entries.get("Exec")?.clone();
    let package = id.strip_suffix(".desktop").unwrap_or(id);

    let extensions = entries
        .iter()
        .filter(|(key, _)| key.starts_with(EXTENSION_PREFIX))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Some(DesktopApp {
        id: id.to_string(),
        component: ComponentName::new(package, id),
        name,
        exec,
        icon_name: entries.get("Icon").filter(|s| !s.is_empty()).cloned(),
        no_display: entries
            .get("NoDisplay")
            .map(|s| s == "true")
            .unwrap_or(false),
        extensions,
        desktop_file_path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALENDAR: &str = "\
[Desktop Entry]
Type=Application
Name=Calendar
Exec=gnome-calendar
Icon=org.gnome.Calendar
X-CapyShell-DayIcons=cal-01;cal-02;cal-03;
X-GNOME-UsesNotifications=true

[Desktop Action new]
Name=New Event
X-Ignored=1
";

    #[test]
    fn test_parse_calendar_entry() {
        let app = parse_desktop_entry(
            "org.gnome.Calendar.desktop",
            CALENDAR,
            Path::new("/usr/share/applications/org.gnome.Calendar.desktop"),
        )
        .unwrap();

        assert_eq!(app.package(), "org.gnome.Calendar");
        assert_eq!(app.name, "Calendar");
        assert_eq!(app.extensions.len(), 2);
        assert_eq!(
            app.extensions.get("X-CapyShell-DayIcons").map(String::as_str),
            Some("cal-01;cal-02;cal-03;")
        );
        assert!(!app.extensions.contains_key("X-Ignored"));
        assert_eq!(
            app.default_icon(96).source,
            IconSource::Themed("org.gnome.Calendar".into())
        );
    }

    #[test]
    fn test_non_application_is_rejected() {
        let link = "[Desktop Entry]\nType=Link\nName=Docs\nURL=https://example.org\n";
        assert!(parse_desktop_entry("docs.desktop", link, Path::new("docs.desktop")).is_none());
    }

    #[test]
    fn test_missing_icon_uses_fallback() {
        let app = parse_desktop_entry(
            "tool.desktop",
            "[Desktop Entry]\nType=Application\nName=Tool\nExec=tool\nIcon=\n",
            Path::new("tool.desktop"),
        )
        .unwrap();

        assert_eq!(
            app.default_icon(48).source,
            IconSource::Themed(FALLBACK_ICON.into())
        );
    }

    #[test]
    fn test_absolute_icon_is_file() {
        assert_eq!(
            icon_source("/opt/app/icon.png"),
            IconSource::File(PathBuf::from("/opt/app/icon.png"))
        );
    }
}
