//! capy-icons: Dynamic app icon provider for CapyShell.
//!
//! Provides:
//! - Icon providers selected by name, falling back to the default provider
//! - Day-of-month icon overrides for calendar-like apps
//! - State fingerprints for icon cache validation
//! - Invalidation of dynamic icons on date, time and timezone changes
//! - A desktop entry backed application registry for Linux hosts

mod catalog;
mod clock;
mod config;
mod desktop_entry;
mod error;
mod events;
mod fingerprint;
mod host;
mod invalidation;
mod loader;
mod monitor;
mod owners;
mod paths;
mod provider;
mod resolver;
mod state;
mod types;

#[cfg(test)]
mod testing;

pub use catalog::{DesktopRegistry, DesktopResources};
pub use clock::{Clock, SystemClock, canonical_locale};
pub use config::{IconConfig, MonitorConfig, PROVIDER_ENV};
pub use desktop_entry::DesktopApp;
pub use error::{IconError, Result};
pub use events::{CHANNEL_CAPACITY, TimeEvents};
pub use fingerprint::fingerprint;
pub use host::{
    AppRegistry, ApplicationEntry, ModelCallbacks, ProfileService, ResourceContainer,
    ShortcutManager,
};
pub use invalidation::{InvalidationListener, ListenerState};
pub use loader::{ProviderFactory, ProviderRegistry};
pub use monitor::{ClockSample, MonitorHandle, TimeChangeMonitor, detect_changes};
pub use owners::{CALENDAR_PACKAGE, CALENDAR_ROUND_ICONS, DynamicOwner, OwnerPolicy};
pub use provider::{
    DEFAULT_PROVIDER, DefaultIconProvider, IconProvider, ProviderContext, STATIC_PROVIDER,
    StaticIconProvider,
};
pub use resolver::DynamicIconResolver;
pub use state::{StateSnapshot, SystemState};
pub use types::{
    ComponentName, IconHandle, IconSource, MetadataBundle, MetadataValue, OverrideTable,
    ResourceId, ShortcutRef, TimeChangeEvent, UserProfile,
};
