//! Group directory.
//!
//! A group is not stored anywhere. It is the set of leads sharing a `group`
//! string, so listing groups is a projection over all leads and renaming or
//! deleting one is a bulk write filtered by the old name. None of this is
//! atomic: a lead created with the old name while a rename runs may keep it.

use std::collections::BTreeSet;

use entities::LeadPatch;

use crate::{distinct_values, LeadField, LeadFilter, LeadStore, LeadStoreError, LeadStoreResult};

/// Group operations over any lead store.
pub struct GroupDirectory<'a, S: LeadStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LeadStore + ?Sized> GroupDirectory<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Distinct non-empty group names. Scans every lead.
    pub async fn list_distinct_groups(&self) -> LeadStoreResult<BTreeSet<String>> {
        let leads = self.store.find_leads(&LeadFilter::new()).await?;
        Ok(distinct_values(&leads, LeadField::Group))
    }

    /// Moves every lead in `old_name` to `new_name`. Returns how many changed.
    pub async fn rename_group(&self, old_name: &str, new_name: &str) -> LeadStoreResult<u64> {
        require_name(old_name)?;

        let modified = self
            .store
            .update_leads(
                &LeadFilter::new().with_group(old_name),
                &LeadPatch::group(new_name),
            )
            .await?;

        tracing::info!(
            old_name = %old_name,
            new_name = %new_name,
            modified,
            "Group renamed"
        );
        Ok(modified)
    }

    /// Deletes every lead in the group. Returns how many were removed.
    ///
    /// An empty name is rejected rather than matched, so this never deletes
    /// the ungrouped leads.
    pub async fn delete_group(&self, name: &str) -> LeadStoreResult<u64> {
        require_name(name)?;

        let deleted = self
            .store
            .delete_leads(&LeadFilter::new().with_group(name))
            .await?;

        tracing::info!(group = %name, deleted, "Group deleted");
        Ok(deleted)
    }
}

// An empty name would select every ungrouped lead.
fn require_name(name: &str) -> LeadStoreResult<()> {
    if name.is_empty() {
        return Err(LeadStoreError::validation("group name is required"));
    }
    Ok(())
}
