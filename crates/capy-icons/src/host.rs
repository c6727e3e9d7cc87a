//! Collaborator interfaces supplied by the host.
//!
//! The provider never owns the application inventory, the resource loader,
//! the profile list or the launcher model. The host plugs them in through
//! these traits.

use crate::error::Result;
use crate::types::{
    ComponentName, IconHandle, MetadataBundle, OverrideTable, ResourceId, ShortcutRef,
    UserProfile,
};
use std::sync::Arc;

/// An installed, launchable application entry.
pub trait ApplicationEntry {
    fn component(&self) -> &ComponentName;

    /// The entry's own icon at `density`.
    fn default_icon(&self, density: u32) -> IconHandle;

    fn package(&self) -> &str {
        &self.component().package
    }
}

/// Installed application inventory.
pub trait AppRegistry: Send + Sync {
    /// Metadata declared by `component`.
    /// Returns `PackageNotFound` when the package is gone.
    fn metadata(&self, component: &ComponentName) -> Result<MetadataBundle>;

    /// Resource container for `package`.
    fn resources_for(&self, package: &str) -> Result<Arc<dyn ResourceContainer>>;
}

/// Resources bundled with a package.
pub trait ResourceContainer: Send + Sync {
    /// Load an array resource as an override table.
    fn load_array(&self, id: ResourceId) -> Result<OverrideTable>;

    /// Load an icon resource at `density`, if it exists.
    fn load_icon(&self, id: ResourceId, density: u32) -> Option<IconHandle>;
}

/// Enumerates the user profiles known to the system.
pub trait ProfileService: Send + Sync {
    fn profiles(&self) -> Vec<UserProfile>;
}

/// Pinned shortcut lookup.
pub trait ShortcutManager: Send + Sync {
    fn query_pinned(&self, package: &str, profile: UserProfile) -> Vec<ShortcutRef>;
}

/// Launcher model refresh hooks.
pub trait ModelCallbacks: Send + Sync {
    fn on_package_changed(&self, package: &str, profile: UserProfile);

    fn update_pinned_shortcuts(&self, package: &str, shortcuts: &[ShortcutRef], profile: UserProfile);
}
