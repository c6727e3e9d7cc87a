//! User profiles known to this host.
//!
//! Linux desktops have a single profile per session, but the icon provider
//! iterates a list, so extra profile ids can be supplied for managed setups.

use capy_icons::{ProfileService, UserProfile};

/// Primary profile id of the session user.
pub const PRIMARY: UserProfile = UserProfile(0);

pub struct LocalProfiles {
    profiles: Vec<UserProfile>,
}

impl LocalProfiles {
    /// The session user only.
    pub fn current() -> Self {
        Self::with_extra(&[])
    }

    /// The session user plus `extra` profile ids, duplicates removed.
    pub fn with_extra(extra: &[u32]) -> Self {
        let mut profiles = vec![PRIMARY];
        for id in extra {
            let profile = UserProfile(*id);
            if !profiles.contains(&profile) {
                profiles.push(profile);
            }
        }
        Self { profiles }
    }
}

impl ProfileService for LocalProfiles {
    fn profiles(&self) -> Vec<UserProfile> {
        self.profiles.clone()
    }
}
