//! Day-indexed icon override resolution.

use crate::clock::Clock;
use crate::error::Result;
use crate::host::{AppRegistry, ApplicationEntry};
use crate::owners::{DynamicOwner, OwnerPolicy};
use crate::types::{IconHandle, ResourceId};
use log::debug;
use std::sync::Arc;

/// Picks the icon for an application entry, substituting today's entry of an
/// owner package's override table when one is declared.
pub struct DynamicIconResolver {
    registry: Arc<dyn AppRegistry>,
    policy: Arc<OwnerPolicy>,
    clock: Arc<dyn Clock>,
}

impl DynamicIconResolver {
    pub fn new(
        registry: Arc<dyn AppRegistry>,
        policy: Arc<OwnerPolicy>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            policy,
            clock,
        }
    }

    pub fn policy(&self) -> &OwnerPolicy {
        &self.policy
    }

    /// Resolve the icon for `entry` at `density`. Never fails: anything that
    /// goes wrong yields the entry's default icon.
    pub fn resolve(&self, entry: &dyn ApplicationEntry, density: u32) -> IconHandle {
        let Some(owner) = self.policy.find(entry.package()) else {
            return entry.default_icon(density);
        };

        match self.override_icon(owner, entry, density) {
            Ok(Some(icon)) => icon,
            Ok(None) => entry.default_icon(density),
            Err(e) => {
                debug!("No icon override for {}: {}", entry.component(), e);
                entry.default_icon(density)
            }
        }
    }

    fn override_icon(
        &self,
        owner: &DynamicOwner,
        entry: &dyn ApplicationEntry,
        density: u32,
    ) -> Result<Option<IconHandle>> {
        let metadata = self.registry.metadata(entry.component())?;
        let resources = self.registry.resources_for(entry.package())?;

        let Some(table_id) = ResourceId::from_raw(metadata.get_int(&owner.table_key, 0)) else {
            return Ok(None);
        };

        let day = self.clock.day_index();
        let shape = match resources.load_array(table_id) {
            Ok(table) => table.resource_at(day),
            Err(e) => {
                debug!("Ignoring override table {} of {}: {}", table_id, owner.package, e);
                None
            }
        };

        Ok(shape.and_then(|id| resources.load_icon(id, density)))
    }
}
