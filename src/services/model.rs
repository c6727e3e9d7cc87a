//! Model refresh events.
//!
//! Implements the provider's model callbacks by publishing [`IconEvent`]s on
//! a process wide broadcast channel, so any number of views can react to an
//! invalidated icon.

use crate::event_bus::CHANNEL_CAPACITY;
use capy_icons::{ModelCallbacks, ShortcutRef, UserProfile};
use std::sync::OnceLock;
use tokio::sync::broadcast::{self, Receiver, Sender};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconEvent {
    /// Icons of `package` must be reloaded in `profile`.
    PackageChanged {
        package: String,
        profile: UserProfile,
    },
    /// Pinned shortcuts of `package` must be redrawn in `profile`.
    PinnedShortcutsChanged {
        package: String,
        shortcuts: Vec<ShortcutRef>,
        profile: UserProfile,
    },
}

static MODEL_SENDER: OnceLock<Sender<IconEvent>> = OnceLock::new();

fn get_sender() -> &'static Sender<IconEvent> {
    MODEL_SENDER.get_or_init(|| {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        tx
    })
}

/// Send an event to all subscribers. Non-blocking.
/// If no receivers, the event is dropped.
#[inline]
pub fn send(event: IconEvent) {
    let _ = get_sender().send(event);
}

/// Subscribe to model events.
pub fn subscribe() -> Receiver<IconEvent> {
    get_sender().subscribe()
}

/// [`ModelCallbacks`] that forward to the model bus.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModelBus;

impl ModelCallbacks for ModelBus {
    fn on_package_changed(&self, package: &str, profile: UserProfile) {
        send(IconEvent::PackageChanged {
            package: package.to_string(),
            profile,
        });
    }

    fn update_pinned_shortcuts(&self, package: &str, shortcuts: &[ShortcutRef], profile: UserProfile) {
        send(IconEvent::PinnedShortcutsChanged {
            package: package.to_string(),
            shortcuts: shortcuts.to_vec(),
            profile,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callbacks_publish_in_order() {
        let mut rx = subscribe();
        let shortcut = ShortcutRef {
            package: "org.gnome.Calendar".into(),
            id: "agenda".into(),
        };

        ModelBus.on_package_changed("org.gnome.Calendar", UserProfile(0));
        ModelBus.update_pinned_shortcuts("org.gnome.Calendar", &[shortcut.clone()], UserProfile(0));

        assert_eq!(
            rx.try_recv().unwrap(),
            IconEvent::PackageChanged {
                package: "org.gnome.Calendar".into(),
                profile: UserProfile(0),
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            IconEvent::PinnedShortcutsChanged {
                package: "org.gnome.Calendar".into(),
                shortcuts: vec![shortcut],
                profile: UserProfile(0),
            }
        );
    }
}
