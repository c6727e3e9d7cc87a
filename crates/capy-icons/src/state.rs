//! Shared system state snapshot.

use crate::clock::Clock;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Immutable view of the state icons depend on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateSnapshot {
    pub locale: String,
    /// Bumped on every store.
    pub version: u64,
}

/// Atomically swappable state cell.
///
/// Readers get a whole snapshot; a concurrent `store` is either fully visible
/// or not at all.
pub struct SystemState {
    current: ArcSwap<StateSnapshot>,
}

impl SystemState {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            current: ArcSwap::from_pointee(StateSnapshot {
                locale: locale.into(),
                version: 0,
            }),
        }
    }

    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::new(clock.locale())
    }

    pub fn load(&self) -> Arc<StateSnapshot> {
        self.current.load_full()
    }

    pub fn store(&self, locale: impl Into<String>) {
        let locale = locale.into();
        self.current.rcu(|prev| StateSnapshot {
            locale: locale.clone(),
            version: prev.version + 1,
        });
    }
}
