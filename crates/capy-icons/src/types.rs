//! Core types for capy-icons

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Handle to a resource inside a package's resource container.
///
/// Zero is never a valid id, matching the "0 means unset" convention of
/// integer metadata values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(u32);

impl ResourceId {
    /// Build an id from a raw metadata integer. Zero, negative and
    /// out-of-range values mean "no resource".
    pub fn from_raw(raw: i64) -> Option<Self> {
        match u32::try_from(raw) {
            Ok(0) | Err(_) => None,
            Ok(v) => Some(ResourceId(v)),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Id of the `index`-th (0-based) resource of a container.
    pub(crate) fn from_index(index: usize) -> Self {
        ResourceId(index as u32 + 1)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// An isolated user context (primary user, work profile, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserProfile(pub u32);

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user#{}", self.0)
    }
}

/// Identifies a launchable component: owning package plus activity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentName {
    pub package: String,
    pub activity: String,
}

impl ComponentName {
    pub fn new(package: impl Into<String>, activity: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            activity: activity.into(),
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.activity)
    }
}

/// Where an icon's pixels come from. Loading and rasterising is left to the
/// renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconSource {
    /// A resource inside a package's resource container.
    Resource { package: String, id: ResourceId },
    /// A themed icon name (e.g. "org.gnome.Calendar").
    Themed(String),
    /// An absolute file path.
    File(PathBuf),
}

/// A resolved icon at a given density (dpi).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconHandle {
    pub source: IconSource,
    pub density: u32,
}

impl IconHandle {
    pub fn new(source: IconSource, density: u32) -> Self {
        Self { source, density }
    }
}

/// A shortcut pinned to the home screen for some package.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShortcutRef {
    pub package: String,
    pub id: String,
}

/// System time changes that invalidate date dependent icons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeChangeEvent {
    DateChanged,
    TimeSet,
    TimezoneChanged,
}

/// A single value declared in an application's metadata.
#[derive(Clone, Debug, PartialEq)]
pub enum MetadataValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

/// Metadata declared by an application component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetadataBundle {
    values: HashMap<String, MetadataValue>,
}

impl MetadataBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetadataValue) {
        self.values.insert(key.into(), value);
    }

    pub fn with_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.insert(key, MetadataValue::Int(value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.values.get(key)
    }

    /// Integer value for `key`, or `default` when missing or not an integer.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(MetadataValue::Int(v)) => *v,
            _ => default,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Day indexed sequence of icon resources.
///
/// Slots that do not reference a resource are stored as `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: Vec<Option<ResourceId>>,
}

impl OverrideTable {
    pub fn new(entries: Vec<Option<ResourceId>>) -> Self {
        Self { entries }
    }

    /// Bounds checked lookup. Out of range and empty slots yield `None`.
    pub fn resource_at(&self, index: usize) -> Option<ResourceId> {
        self.entries.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ResourceId> for OverrideTable {
    fn from_iter<I: IntoIterator<Item = ResourceId>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Some).collect(),
        }
    }
}
