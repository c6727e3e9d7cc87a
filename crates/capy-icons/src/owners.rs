//! Packages allowed to present day-indexed icons.

use serde::{Deserialize, Serialize};

/// The calendar package that ships a day-of-month icon set.
pub const CALENDAR_PACKAGE: &str = "com.google.android.calendar";
/// Metadata key holding the calendar's round icon table.
pub const CALENDAR_ROUND_ICONS: &str = "com.google.android.calendar._icons_nexus_round";

/// A package eligible for day-indexed icon overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicOwner {
    pub package: String,
    /// Integer metadata key naming the override table resource.
    pub table_key: String,
}

impl DynamicOwner {
    pub fn new(package: impl Into<String>, table_key: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            table_key: table_key.into(),
        }
    }

    pub fn calendar() -> Self {
        Self::new(CALENDAR_PACKAGE, CALENDAR_ROUND_ICONS)
    }
}

/// Ordered set of dynamic owners. First registration of a package wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnerPolicy {
    owners: Vec<DynamicOwner>,
}

impl OwnerPolicy {
    pub fn new(owners: impl IntoIterator<Item = DynamicOwner>) -> Self {
        let mut deduped: Vec<DynamicOwner> = Vec::new();
        for owner in owners {
            if !deduped.iter().any(|o| o.package == owner.package) {
                deduped.push(owner);
            }
        }
        Self { owners: deduped }
    }

    pub fn find(&self, package: &str) -> Option<&DynamicOwner> {
        self.owners.iter().find(|o| o.package == package)
    }

    #[inline]
    pub fn is_owner(&self, package: &str) -> bool {
        self.find(package).is_some()
    }

    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.owners.iter().map(|o| o.package.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl Default for OwnerPolicy {
    fn default() -> Self {
        Self::new([DynamicOwner::calendar()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_calendar_only() {
        let policy = OwnerPolicy::default();
        assert!(policy.is_owner(CALENDAR_PACKAGE));
        assert!(!policy.is_owner("org.mozilla.firefox"));
        assert_eq!(
            policy.find(CALENDAR_PACKAGE).map(|o| o.table_key.as_str()),
            Some(CALENDAR_ROUND_ICONS)
        );
    }

    #[test]
    fn test_duplicate_owner_keeps_first() {
        let policy = OwnerPolicy::new([
            DynamicOwner::new("a", "first"),
            DynamicOwner::new("b", "key"),
            DynamicOwner::new("a", "second"),
        ]);

        assert_eq!(policy.packages().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(policy.find("a").unwrap().table_key, "first");
    }
}
