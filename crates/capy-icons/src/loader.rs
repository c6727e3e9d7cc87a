//! Provider lookup by name.
//!
//! The host picks a provider with a string identifier at startup. Unknown
//! identifiers and failing factories fall back to the default provider, so a
//! bad configuration never prevents icons from loading.

use crate::error::{IconError, Result};
use crate::provider::{
    DEFAULT_PROVIDER, DefaultIconProvider, IconProvider, ProviderContext, STATIC_PROVIDER,
    StaticIconProvider,
};
use log::{debug, error};
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Constructor for a named provider.
pub type ProviderFactory =
    Box<dyn Fn(&ProviderContext) -> Result<Arc<dyn IconProvider>> + Send + Sync>;

/// Factory map from provider identifier to constructor.
pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// Empty registry. `load` still yields the default provider.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with the built-in providers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(DEFAULT_PROVIDER, |ctx| {
            Ok(Arc::new(DefaultIconProvider::new(ctx)) as Arc<dyn IconProvider>)
        });
        registry.register(STATIC_PROVIDER, |ctx| {
            Ok(Arc::new(StaticIconProvider::new(ctx)) as Arc<dyn IconProvider>)
        });
        registry
    }

    /// Register (or replace) the factory for `id`.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn(&ProviderContext) -> Result<Arc<dyn IconProvider>> + Send + Sync + 'static,
    {
        self.factories.insert(id.into(), Box::new(factory));
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Build the provider named `id`. Empty or missing ids return the default
    /// provider without consulting the factory map; any construction failure
    /// is logged and also yields the default provider.
    pub fn load(&self, id: Option<&str>, ctx: &ProviderContext) -> Arc<dyn IconProvider> {
        let id = match id.map(str::trim) {
            None | Some("") => return Arc::new(DefaultIconProvider::new(ctx)),
            Some(id) => id,
        };

        debug!("Loading icon provider: {}", id);
        match self.construct(id, ctx) {
            Ok(provider) => provider,
            Err(e) => {
                error!("Bad icon provider, using default: {}", e);
                Arc::new(DefaultIconProvider::new(ctx))
            }
        }
    }

    fn construct(&self, id: &str, ctx: &ProviderContext) -> Result<Arc<dyn IconProvider>> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| IconError::UnknownProvider(id.to_string()))?;

        match panic::catch_unwind(AssertUnwindSafe(|| factory(ctx))) {
            Ok(Ok(provider)) => Ok(provider),
            Ok(Err(e)) => Err(IconError::ProviderConstruction {
                id: id.to_string(),
                reason: e.to_string(),
            }),
            Err(payload) => Err(IconError::ProviderConstruction {
                id: id.to_string(),
                reason: panic_message(payload.as_ref()),
            }),
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panicked".to_string()
    }
}
