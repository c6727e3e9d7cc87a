//! Icon state fingerprints.
//!
//! Callers compare fingerprints to decide whether a cached icon is still
//! valid. The locale part comes from the stored snapshot and only changes on
//! `refresh_state`. The day suffix of owner packages is read live, so it rolls
//! over at local midnight without any event.

use crate::clock::Clock;
use crate::owners::OwnerPolicy;
use crate::state::StateSnapshot;

/// Fingerprint of the state relevant to `package`'s icon.
pub fn fingerprint(
    state: &StateSnapshot,
    policy: &OwnerPolicy,
    clock: &dyn Clock,
    package: &str,
) -> String {
    if policy.is_owner(package) {
        format!("{} {}", state.locale, clock.day_index())
    } else {
        state.locale.clone()
    }
}
