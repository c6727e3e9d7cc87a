//! Time change event bus.
//!
//! Broadcast channel (tokio): every subscribed listener receives every event.
//! Senders are the OS-facing monitor and the host; receivers are the
//! invalidation workers of live providers.

use crate::types::TimeChangeEvent;
use tokio::sync::broadcast::{self, Receiver, Sender};

/// Broadcast channel capacity. Lagging receivers skip old events, which is
/// fine since every event kind triggers the same refresh.
pub const CHANNEL_CAPACITY: usize = 16;

/// Cloneable handle to the time change bus.
#[derive(Clone, Debug)]
pub struct TimeEvents {
    tx: Sender<TimeChangeEvent>,
}

impl TimeEvents {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish an event. Returns false when nobody is listening, which is
    /// expected during startup.
    #[inline]
    pub fn send(&self, event: TimeChangeEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// New receiver for all future events.
    pub fn subscribe(&self) -> Receiver<TimeChangeEvent> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for TimeEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_without_receivers_is_dropped() {
        let events = TimeEvents::new();
        assert!(!events.send(TimeChangeEvent::DateChanged));
    }

    #[test]
    fn test_every_subscriber_sees_every_event() {
        let events = TimeEvents::new();
        let mut a = events.subscribe();
        let mut b = events.subscribe();

        assert!(events.send(TimeChangeEvent::TimezoneChanged));
        assert_eq!(a.try_recv().unwrap(), TimeChangeEvent::TimezoneChanged);
        assert_eq!(b.try_recv().unwrap(), TimeChangeEvent::TimezoneChanged);
    }
}
