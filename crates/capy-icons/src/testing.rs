//! In-memory collaborators for unit tests.

use crate::clock::Clock;
use crate::error::{IconError, Result};
use crate::host::{
    AppRegistry, ApplicationEntry, ModelCallbacks, ProfileService, ResourceContainer,
    ShortcutManager,
};
use crate::types::{
    ComponentName, IconHandle, IconSource, MetadataBundle, OverrideTable, ResourceId,
    ShortcutRef, UserProfile,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

pub fn rid(raw: u32) -> ResourceId {
    ResourceId::from_raw(i64::from(raw)).unwrap()
}

pub struct FakeClock {
    day: AtomicU32,
    locale: RwLock<String>,
}

impl FakeClock {
    pub fn new(locale: &str, day_of_month: u32) -> Arc<Self> {
        Arc::new(Self {
            day: AtomicU32::new(day_of_month),
            locale: RwLock::new(locale.to_string()),
        })
    }

    pub fn set_day(&self, day_of_month: u32) {
        self.day.store(day_of_month, Ordering::SeqCst);
    }

    pub fn set_locale(&self, locale: &str) {
        *self.locale.write().unwrap() = locale.to_string();
    }
}

impl Clock for FakeClock {
    fn day_of_month(&self) -> u32 {
        self.day.load(Ordering::SeqCst)
    }

    fn locale(&self) -> String {
        self.locale.read().unwrap().clone()
    }
}

pub struct FakeEntry {
    pub component: ComponentName,
}

impl FakeEntry {
    pub fn new(package: &str) -> Self {
        Self {
            component: ComponentName::new(package, format!("{package}.Main")),
        }
    }
}

impl ApplicationEntry for FakeEntry {
    fn component(&self) -> &ComponentName {
        &self.component
    }

    fn default_icon(&self, density: u32) -> IconHandle {
        IconHandle::new(IconSource::Themed(self.component.package.clone()), density)
    }
}

/// Resources for one package.
#[derive(Default)]
pub struct FakeResources {
    pub package: String,
    pub arrays: HashMap<ResourceId, OverrideTable>,
    pub malformed: Vec<ResourceId>,
    pub icons: Vec<ResourceId>,
}

impl ResourceContainer for FakeResources {
    fn load_array(&self, id: ResourceId) -> Result<OverrideTable> {
        if self.malformed.contains(&id) {
            return Err(IconError::MalformedOverrideTable {
                id,
                reason: "not an array".into(),
            });
        }
        self.arrays
            .get(&id)
            .cloned()
            .ok_or(IconError::ResourceNotFound(id))
    }

    fn load_icon(&self, id: ResourceId, density: u32) -> Option<IconHandle> {
        self.icons.contains(&id).then(|| {
            IconHandle::new(
                IconSource::Resource {
                    package: self.package.clone(),
                    id,
                },
                density,
            )
        })
    }
}

/// Registry that counts every call it receives.
#[derive(Default)]
pub struct FakeRegistry {
    pub metadata: HashMap<String, MetadataBundle>,
    pub resources: HashMap<String, Arc<FakeResources>>,
    pub calls: AtomicUsize,
}

impl FakeRegistry {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Registers `package` with a table of `size` icons under `key`.
    /// Table resource is 0x100, entry `i` is `0x1000 + i`.
    pub fn with_day_table(mut self, package: &str, key: &str, size: u32) -> Self {
        let table_id = rid(0x100);
        let entries: Vec<ResourceId> = (0..size).map(|i| rid(0x1000 + i)).collect();

        let mut resources = FakeResources {
            package: package.to_string(),
            ..Default::default()
        };
        resources.icons.extend(entries.iter().copied());
        resources
            .arrays
            .insert(table_id, entries.into_iter().collect());

        self.metadata.insert(
            package.to_string(),
            MetadataBundle::new().with_int(key, i64::from(table_id.get())),
        );
        self.resources.insert(package.to_string(), Arc::new(resources));
        self
    }
}

impl AppRegistry for FakeRegistry {
    fn metadata(&self, component: &ComponentName) -> Result<MetadataBundle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.metadata
            .get(&component.package)
            .cloned()
            .ok_or_else(|| IconError::PackageNotFound(component.package.clone()))
    }

    fn resources_for(&self, package: &str) -> Result<Arc<dyn ResourceContainer>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.resources.get(package) {
            Some(res) => Ok(res.clone()),
            None => Err(IconError::PackageNotFound(package.to_string())),
        }
    }
}

pub struct FakeProfiles(pub Vec<UserProfile>);

impl ProfileService for FakeProfiles {
    fn profiles(&self) -> Vec<UserProfile> {
        self.0.clone()
    }
}

#[derive(Default)]
pub struct FakeShortcuts {
    pub pinned: HashMap<(String, UserProfile), Vec<ShortcutRef>>,
}

impl FakeShortcuts {
    pub fn pin(mut self, package: &str, profile: UserProfile, id: &str) -> Self {
        self.pinned
            .entry((package.to_string(), profile))
            .or_default()
            .push(ShortcutRef {
                package: package.to_string(),
                id: id.to_string(),
            });
        self
    }
}

impl ShortcutManager for FakeShortcuts {
    fn query_pinned(&self, package: &str, profile: UserProfile) -> Vec<ShortcutRef> {
        self.pinned
            .get(&(package.to_string(), profile))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelCall {
    PackageChanged(String, UserProfile),
    PinnedUpdated(String, Vec<ShortcutRef>, UserProfile),
}

#[derive(Default)]
pub struct RecordingModel {
    pub calls: Mutex<Vec<ModelCall>>,
}

impl RecordingModel {
    pub fn calls(&self) -> Vec<ModelCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl ModelCallbacks for RecordingModel {
    fn on_package_changed(&self, package: &str, profile: UserProfile) {
        self.calls
            .lock()
            .unwrap()
            .push(ModelCall::PackageChanged(package.to_string(), profile));
    }

    fn update_pinned_shortcuts(&self, package: &str, shortcuts: &[ShortcutRef], profile: UserProfile) {
        self.calls.lock().unwrap().push(ModelCall::PinnedUpdated(
            package.to_string(),
            shortcuts.to_vec(),
            profile,
        ));
    }
}
