//! capy-icond - Dynamic app icon daemon for CapyShell
//!
//! Loads the configured icon provider, watches for date, time and timezone
//! changes and republishes icon invalidations on the model bus.

mod event_bus;
mod services;

use capy_icons::{
    DesktopRegistry, IconConfig, IconProvider, ProviderContext, ProviderRegistry,
    TimeChangeMonitor, TimeEvents,
};
use log::{error, info, warn};
use services::model::{self, IconEvent, ModelBus};
use services::profiles::LocalProfiles;
use services::shortcuts::PinnedShortcutStore;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// Density used when logging resolved icons (xxhdpi).
const LOG_DENSITY: u32 = 480;

fn load_config() -> IconConfig {
    let Some(path) = IconConfig::default_path() else {
        warn!("No config directory, using default icon config");
        return IconConfig::default();
    };

    match IconConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load {}: {}. Using defaults.", path.display(), e);
            IconConfig::default()
        }
    }
}

fn load_shortcuts(config: &IconConfig) -> PinnedShortcutStore {
    config
        .pinned_shortcuts_path
        .clone()
        .or_else(PinnedShortcutStore::default_path)
        .map(|path| PinnedShortcutStore::load(&path))
        .unwrap_or_default()
}

fn log_refresh(provider: &dyn IconProvider, registry: &DesktopRegistry, event: IconEvent) {
    match event {
        IconEvent::PackageChanged { package, profile } => {
            let state = provider.icon_system_state(&package);
            match registry.get_app(&package) {
                Some(app) => info!(
                    "{} changed for {} (state '{}'), icon now {:?}",
                    package,
                    profile,
                    state,
                    provider.icon(&app, LOG_DENSITY).source
                ),
                None => info!("{} changed for {} (state '{}')", package, profile, state),
            }
        }
        IconEvent::PinnedShortcutsChanged {
            package,
            shortcuts,
            profile,
        } => {
            info!(
                "Refreshing {} pinned shortcut(s) of {} for {}",
                shortcuts.len(),
                package,
                profile
            );
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting capy-icond...");

    let config = load_config();

    let registry = Arc::new(DesktopRegistry::new());
    registry.refresh();
    info!("Indexed {} desktop applications", registry.len());

    let events = TimeEvents::new();
    let ctx = ProviderContext::new(
        registry.clone(),
        Arc::new(LocalProfiles::current()),
        Arc::new(load_shortcuts(&config)),
        Arc::new(ModelBus),
    )
    .with_policy(config.owner_policy())
    .with_events(events.clone());

    // Subscribe before the provider starts its worker so nothing is missed.
    let mut rx = model::subscribe();

    let provider = ProviderRegistry::with_builtins().load(config.provider_id().as_deref(), &ctx);
    info!("Using icon provider '{}'", provider.id());

    let _monitor = match TimeChangeMonitor::new(events, config.monitor.clone()).start() {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!("Time change monitor failed to start: {}", e);
            None
        }
    };

    loop {
        match rx.recv().await {
            Ok(event) => log_refresh(provider.as_ref(), &registry, event),
            Err(RecvError::Lagged(skipped)) => warn!("Model bus lagged, skipped {}", skipped),
            Err(RecvError::Closed) => break,
        }
    }

    Ok(())
}
