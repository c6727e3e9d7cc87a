//! Event bus for cross-thread communication.
//!
//! Broadcast channel (tokio): all subscribers receive every event. The
//! invalidation worker publishes from its own thread, the daemon loop and any
//! UI consumers subscribe.

/// Broadcast channel capacity.
/// Lagging receivers will skip old events.
pub const CHANNEL_CAPACITY: usize = 64;
