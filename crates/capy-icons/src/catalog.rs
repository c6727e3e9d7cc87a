//! Desktop entry backed application registry.
//!
//! Vendor extension keys of a desktop entry become its metadata. A list
//! valued key (`X-Foo=a;b;c;`) is interned as an array resource whose items
//! are icon resources, so a calendar entry can declare its day icons as
//! `X-CapyShell-DayIcons=cal-01;cal-02;...;cal-31;`.

use crate::desktop_entry::{DesktopApp, icon_source, parse_desktop_file};
use crate::error::{IconError, Result};
use crate::host::{AppRegistry, ResourceContainer};
use crate::paths::application_directories;
use crate::types::{
    ComponentName, IconHandle, MetadataBundle, MetadataValue, OverrideTable, ResourceId,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

enum Resource {
    Icon(String),
    Array(Vec<ResourceId>),
}

/// Interned resources of one desktop package.
#[derive(Default)]
pub struct DesktopResources {
    resources: Vec<Resource>,
}

impl DesktopResources {
    fn intern(&mut self, resource: Resource) -> ResourceId {
        self.resources.push(resource);
        ResourceId::from_index(self.resources.len() - 1)
    }

    fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.index())
    }
}

impl ResourceContainer for DesktopResources {
    fn load_array(&self, id: ResourceId) -> Result<OverrideTable> {
        match self.get(id) {
            Some(Resource::Array(items)) => Ok(items.iter().copied().collect()),
            Some(Resource::Icon(_)) => Err(IconError::MalformedOverrideTable {
                id,
                reason: "icon resource used as a table".to_string(),
            }),
            None => Err(IconError::ResourceNotFound(id)),
        }
    }

    fn load_icon(&self, id: ResourceId, density: u32) -> Option<IconHandle> {
        match self.get(id)? {
            Resource::Icon(name) => Some(IconHandle::new(icon_source(name), density)),
            Resource::Array(_) => None,
        }
    }
}

struct DesktopPackage {
    app: DesktopApp,
    metadata: MetadataBundle,
    resources: Arc<DesktopResources>,
}

impl DesktopPackage {
    fn new(app: DesktopApp) -> Self {
        let mut metadata = MetadataBundle::new();
        let mut resources = DesktopResources::default();

        for (key, raw) in &app.extensions {
            metadata.insert(key.clone(), metadata_value(raw, &mut resources));
        }

        Self {
            app,
            metadata,
            resources: Arc::new(resources),
        }
    }
}

fn metadata_value(raw: &str, resources: &mut DesktopResources) -> MetadataValue {
    if raw.contains(';') {
        let items: Vec<ResourceId> = raw
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| resources.intern(Resource::Icon(item.to_string())))
            .collect();
        let array = resources.intern(Resource::Array(items));
        return MetadataValue::Int(i64::from(array.get()));
    }

    if let Ok(v) = raw.parse::<i64>() {
        return MetadataValue::Int(v);
    }

    match raw {
        "true" => MetadataValue::Bool(true),
        "false" => MetadataValue::Bool(false),
        _ => MetadataValue::Str(raw.to_string()),
    }
}

/// Installed applications discovered from `.desktop` files.
pub struct DesktopRegistry {
    /// Packages indexed by package name (desktop id without extension).
    packages: RwLock<HashMap<String, DesktopPackage>>,
}

impl DesktopRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            packages: RwLock::new(HashMap::new()),
        }
    }

    /// Rescan all XDG application directories.
    pub fn refresh(&self) {
        self.scan_dirs(&application_directories());
    }

    /// Replace the registry contents with the entries found under `dirs`.
    /// Earlier directories take precedence for duplicate ids.
    pub fn scan_dirs(&self, dirs: &[PathBuf]) {
        info!("Scanning desktop entries...");
        let mut packages = HashMap::new();

        for dir in dirs {
            if !dir.exists() {
                continue;
            }

            let walker = walkdir::WalkDir::new(dir).follow_links(true).max_depth(3);
            for entry in walker.into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("desktop") {
                    continue;
                }
                if let Some(app) = parse_desktop_file(path) {
                    packages
                        .entry(app.package().to_string())
                        .or_insert_with(|| DesktopPackage::new(app));
                }
            }
        }

        debug!("Found {} desktop applications", packages.len());
        if let Ok(mut guard) = self.packages.write() {
            *guard = packages;
        }
    }

    /// Get app details by package name.
    pub fn get_app(&self, package: &str) -> Option<DesktopApp> {
        self.packages
            .read()
            .ok()
            .and_then(|map| map.get(package).map(|p| p.app.clone()))
    }

    /// Visible apps, sorted by package.
    pub fn apps(&self) -> Vec<DesktopApp> {
        let mut apps: Vec<DesktopApp> = self
            .packages
            .read()
            .map(|map| {
                map.values()
                    .filter(|p| !p.app.no_display)
                    .map(|p| p.app.clone())
                    .collect()
            })
            .unwrap_or_default();
        apps.sort_by(|a, b| a.package().cmp(b.package()));
        apps
    }

    pub fn len(&self) -> usize {
        self.packages.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DesktopRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AppRegistry for DesktopRegistry {
    fn metadata(&self, component: &ComponentName) -> Result<MetadataBundle> {
        self.packages
            .read()
            .ok()
            .and_then(|map| map.get(&component.package).map(|p| p.metadata.clone()))
            .ok_or_else(|| IconError::PackageNotFound(component.package.clone()))
    }

    fn resources_for(&self, package: &str) -> Result<Arc<dyn ResourceContainer>> {
        self.packages
            .read()
            .ok()
            .and_then(|map| {
                map.get(package)
                    .map(|p| p.resources.clone() as Arc<dyn ResourceContainer>)
            })
            .ok_or_else(|| IconError::PackageNotFound(package.to_string()))
    }
}
