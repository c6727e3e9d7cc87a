//! Refreshes dynamic owner packages when the date, time or timezone changes.
//!
//! One background worker per provider drains the time change bus until the
//! provider drops its stop handle or the bus closes. Each event
//! re-evaluates every owner package in every profile: first the model is told
//! the package changed, then any pinned shortcuts of that package are
//! refreshed. Event kinds are not distinguished.

use crate::host::{ModelCallbacks, ProfileService, ShortcutManager};
use crate::owners::OwnerPolicy;
use crate::types::TimeChangeEvent;
use log::{debug, error, info, warn};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::oneshot;

const WORKER_NAME: &str = "capy-icons-invalidation";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerState {
    Idle,
    Handling,
}

pub struct InvalidationListener {
    packages: Vec<String>,
    profiles: Arc<dyn ProfileService>,
    shortcuts: Arc<dyn ShortcutManager>,
    model: Arc<dyn ModelCallbacks>,
    handling: AtomicBool,
}

/// Resets the listener to `Idle` on every exit path.
struct HandlingGuard<'a>(&'a AtomicBool);

impl Drop for HandlingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl InvalidationListener {
    pub fn new(
        policy: &OwnerPolicy,
        profiles: Arc<dyn ProfileService>,
        shortcuts: Arc<dyn ShortcutManager>,
        model: Arc<dyn ModelCallbacks>,
    ) -> Self {
        Self {
            packages: policy.packages().map(String::from).collect(),
            profiles,
            shortcuts,
            model,
            handling: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ListenerState {
        if self.handling.load(Ordering::Acquire) {
            ListenerState::Handling
        } else {
            ListenerState::Idle
        }
    }

    /// Handle one time change. Runs to completion.
    pub fn on_event(&self, event: TimeChangeEvent) {
        self.handling.store(true, Ordering::Release);
        let _guard = HandlingGuard(&self.handling);

        let profiles = self.profiles.profiles();
        debug!(
            "{:?}: refreshing {} package(s) across {} profile(s)",
            event,
            self.packages.len(),
            profiles.len()
        );

        for profile in profiles {
            for package in &self.packages {
                self.model.on_package_changed(package, profile);

                let pinned = self.shortcuts.query_pinned(package, profile);
                if !pinned.is_empty() {
                    self.model.update_pinned_shortcuts(package, &pinned, profile);
                }
            }
        }
    }

    /// Start the worker thread. It exits when `stop`'s sender is dropped or
    /// every sender of `rx`'s bus is gone, whichever happens first.
    pub fn spawn(
        self: Arc<Self>,
        rx: Receiver<TimeChangeEvent>,
        stop: oneshot::Receiver<()>,
    ) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_current_thread().build() {
                    Ok(rt) => rt,
                    Err(e) => {
                        error!("Failed to create invalidation runtime: {}", e);
                        return;
                    }
                };
                rt.block_on(self.run(rx, stop));
            })
    }

    async fn run(&self, mut rx: Receiver<TimeChangeEvent>, mut stop: oneshot::Receiver<()>) {
        loop {
            tokio::select! {
                // Stop takes priority over queued events.
                biased;
                _ = &mut stop => {
                    debug!("Icon provider dropped, invalidation worker exiting");
                    break;
                }
                received = rx.recv() => match received {
                    Ok(event) => self.on_event(event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Invalidation worker lagged, skipped {} event(s)", skipped);
                    }
                    Err(RecvError::Closed) => {
                        info!("Time change bus closed, invalidation worker exiting");
                        break;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TimeEvents;
    use crate::owners::{CALENDAR_PACKAGE, DynamicOwner};
    use crate::testing::{FakeProfiles, FakeShortcuts, ModelCall, RecordingModel};
    use crate::types::{ShortcutRef, UserProfile};

    const MAIN: UserProfile = UserProfile(0);
    const WORK: UserProfile = UserProfile(10);

    fn listener(
        policy: &OwnerPolicy,
        profiles: Vec<UserProfile>,
        shortcuts: FakeShortcuts,
    ) -> (Arc<InvalidationListener>, Arc<RecordingModel>) {
        let model = Arc::new(RecordingModel::default());
        let listener = InvalidationListener::new(
            policy,
            Arc::new(FakeProfiles(profiles)),
            Arc::new(shortcuts),
            model.clone(),
        );
        (Arc::new(listener), model)
    }

    fn shortcut(id: &str) -> ShortcutRef {
        ShortcutRef {
            package: CALENDAR_PACKAGE.to_string(),
            id: id.to_string(),
        }
    }

    #[test]
    fn test_date_change_over_two_profiles() {
        let shortcuts = FakeShortcuts::default().pin(CALENDAR_PACKAGE, WORK, "today");
        let (listener, model) = listener(&OwnerPolicy::default(), vec![MAIN, WORK], shortcuts);

        listener.on_event(TimeChangeEvent::DateChanged);

        let calls = model.calls();
        let changed = calls
            .iter()
            .filter(|c| matches!(c, ModelCall::PackageChanged(..)))
            .count();
        let pinned = calls
            .iter()
            .filter(|c| matches!(c, ModelCall::PinnedUpdated(..)))
            .count();
        assert_eq!(changed, 2);
        assert_eq!(pinned, 1);
        assert_eq!(
            calls,
            vec![
                ModelCall::PackageChanged(CALENDAR_PACKAGE.into(), MAIN),
                ModelCall::PackageChanged(CALENDAR_PACKAGE.into(), WORK),
                ModelCall::PinnedUpdated(CALENDAR_PACKAGE.into(), vec![shortcut("today")], WORK),
            ]
        );
    }

    #[test]
    fn test_event_kinds_are_handled_identically() {
        let mut seen = Vec::new();
        for event in [
            TimeChangeEvent::DateChanged,
            TimeChangeEvent::TimeSet,
            TimeChangeEvent::TimezoneChanged,
        ] {
            let shortcuts = FakeShortcuts::default().pin(CALENDAR_PACKAGE, MAIN, "a");
            let (listener, model) = listener(&OwnerPolicy::default(), vec![MAIN], shortcuts);
            listener.on_event(event);
            seen.push(model.calls());
        }

        assert_eq!(seen[0], seen[1]);
        assert_eq!(seen[1], seen[2]);
    }

    #[test]
    fn test_every_owner_is_refreshed() {
        let policy = OwnerPolicy::new([
            DynamicOwner::calendar(),
            DynamicOwner::new("org.gnome.Calendar", "X-Day-Icons"),
        ]);
        let (listener, model) = listener(&policy, vec![MAIN], FakeShortcuts::default());

        listener.on_event(TimeChangeEvent::TimeSet);

        assert_eq!(
            model.calls(),
            vec![
                ModelCall::PackageChanged(CALENDAR_PACKAGE.into(), MAIN),
                ModelCall::PackageChanged("org.gnome.Calendar".into(), MAIN),
            ]
        );
    }

    #[test]
    fn test_no_profiles_means_no_signals() {
        let (listener, model) = listener(&OwnerPolicy::default(), vec![], FakeShortcuts::default());
        listener.on_event(TimeChangeEvent::DateChanged);
        assert!(model.calls().is_empty());
        assert_eq!(listener.state(), ListenerState::Idle);
    }

    #[test]
    fn test_worker_drains_bus_until_closed() {
        let (listener, model) = listener(&OwnerPolicy::default(), vec![MAIN], FakeShortcuts::default());
        let events = TimeEvents::new();
        let (_stop_tx, stop_rx) = oneshot::channel();
        let worker = listener.clone().spawn(events.subscribe(), stop_rx).unwrap();

        assert!(events.send(TimeChangeEvent::DateChanged));
        assert!(events.send(TimeChangeEvent::TimezoneChanged));
        drop(events);
        worker.join().unwrap();

        assert_eq!(model.calls().len(), 2);
        assert_eq!(listener.state(), ListenerState::Idle);
    }

    #[test]
    fn test_dropping_stop_handle_ends_worker_with_bus_open() {
        let (listener, model) = listener(&OwnerPolicy::default(), vec![MAIN], FakeShortcuts::default());
        let events = TimeEvents::new();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let worker = listener.spawn(events.subscribe(), stop_rx).unwrap();

        drop(stop_tx);
        worker.join().unwrap();

        assert_eq!(events.receiver_count(), 0);
        assert!(!events.send(TimeChangeEvent::TimezoneChanged));
        assert!(model.calls().is_empty());
    }
}
