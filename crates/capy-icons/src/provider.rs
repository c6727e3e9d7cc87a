//! Icon providers.
//!
//! A provider resolves icons and reports the state fingerprint callers use to
//! validate cached icons. Providers are built by name through
//! [`ProviderRegistry`](crate::loader::ProviderRegistry).

use crate::clock::{Clock, SystemClock};
use crate::events::TimeEvents;
use crate::fingerprint::fingerprint;
use crate::host::{AppRegistry, ApplicationEntry, ModelCallbacks, ProfileService, ShortcutManager};
use crate::invalidation::InvalidationListener;
use crate::owners::OwnerPolicy;
use crate::resolver::DynamicIconResolver;
use crate::state::SystemState;
use crate::types::IconHandle;
use log::{debug, error};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Identifier of [`DefaultIconProvider`].
pub const DEFAULT_PROVIDER: &str = "default";
/// Identifier of [`StaticIconProvider`].
pub const STATIC_PROVIDER: &str = "static";

/// Icon resolution strategy.
pub trait IconProvider: Send + Sync {
    /// Registry identifier of this provider.
    fn id(&self) -> &str;

    /// Icon for `entry` at `density`. Never fails.
    fn icon(&self, entry: &dyn ApplicationEntry, density: u32) -> IconHandle;

    /// Fingerprint of the state `package`'s icon depends on.
    fn icon_system_state(&self, package: &str) -> String;

    /// Re-read the locale. Call on locale change before trusting
    /// fingerprints again.
    fn refresh_state(&self);
}

/// Everything a provider factory may need.
#[derive(Clone)]
pub struct ProviderContext {
    pub registry: Arc<dyn AppRegistry>,
    pub profiles: Arc<dyn ProfileService>,
    pub shortcuts: Arc<dyn ShortcutManager>,
    pub model: Arc<dyn ModelCallbacks>,
    pub clock: Arc<dyn Clock>,
    pub policy: Arc<OwnerPolicy>,
    pub events: TimeEvents,
}

impl ProviderContext {
    pub fn new(
        registry: Arc<dyn AppRegistry>,
        profiles: Arc<dyn ProfileService>,
        shortcuts: Arc<dyn ShortcutManager>,
        model: Arc<dyn ModelCallbacks>,
    ) -> Self {
        Self {
            registry,
            profiles,
            shortcuts,
            model,
            clock: Arc::new(SystemClock),
            policy: Arc::new(OwnerPolicy::default()),
            events: TimeEvents::new(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_policy(mut self, policy: OwnerPolicy) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn with_events(mut self, events: TimeEvents) -> Self {
        self.events = events;
        self
    }
}

/// Day-of-month aware provider. Subscribes an invalidation worker to the
/// time change bus on construction; the worker stops when the provider is
/// dropped.
pub struct DefaultIconProvider {
    resolver: DynamicIconResolver,
    state: SystemState,
    clock: Arc<dyn Clock>,
    policy: Arc<OwnerPolicy>,
    listener: Arc<InvalidationListener>,
    /// Dropping this ends the invalidation worker.
    _worker_stop: oneshot::Sender<()>,
}

impl DefaultIconProvider {
    pub fn new(ctx: &ProviderContext) -> Self {
        let listener = Arc::new(InvalidationListener::new(
            &ctx.policy,
            ctx.profiles.clone(),
            ctx.shortcuts.clone(),
            ctx.model.clone(),
        ));

        let (worker_stop, stop_rx) = oneshot::channel();
        if let Err(e) = listener.clone().spawn(ctx.events.subscribe(), stop_rx) {
            error!("Failed to start icon invalidation worker: {}", e);
        }

        Self {
            resolver: DynamicIconResolver::new(
                ctx.registry.clone(),
                ctx.policy.clone(),
                ctx.clock.clone(),
            ),
            state: SystemState::from_clock(ctx.clock.as_ref()),
            clock: ctx.clock.clone(),
            policy: ctx.policy.clone(),
            listener,
            _worker_stop: worker_stop,
        }
    }

    pub fn listener(&self) -> &InvalidationListener {
        &self.listener
    }
}

impl IconProvider for DefaultIconProvider {
    fn id(&self) -> &str {
        DEFAULT_PROVIDER
    }

    fn icon(&self, entry: &dyn ApplicationEntry, density: u32) -> IconHandle {
        self.resolver.resolve(entry, density)
    }

    fn icon_system_state(&self, package: &str) -> String {
        fingerprint(&self.state.load(), &self.policy, self.clock.as_ref(), package)
    }

    fn refresh_state(&self) {
        let locale = self.clock.locale();
        debug!("Icon system state locale: {}", locale);
        self.state.store(locale);
    }
}

/// Provider that always uses the entry's own icon. Fingerprints depend on
/// the locale only.
///
/// It has no dynamic owners to refresh, so unlike [`DefaultIconProvider`] it
/// does not subscribe to time change events.
pub struct StaticIconProvider {
    state: SystemState,
    clock: Arc<dyn Clock>,
}

impl StaticIconProvider {
    pub fn new(ctx: &ProviderContext) -> Self {
        Self {
            state: SystemState::from_clock(ctx.clock.as_ref()),
            clock: ctx.clock.clone(),
        }
    }
}

impl IconProvider for StaticIconProvider {
    fn id(&self) -> &str {
        STATIC_PROVIDER
    }

    fn icon(&self, entry: &dyn ApplicationEntry, density: u32) -> IconHandle {
        entry.default_icon(density)
    }

    fn icon_system_state(&self, _package: &str) -> String {
        self.state.load().locale.clone()
    }

    fn refresh_state(&self) {
        self.state.store(self.clock.locale());
    }
}
