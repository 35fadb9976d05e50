//! In-memory lead store implementation for testing.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use entities::{Lead, LeadPatch, NewLead};
use tokio::sync::RwLock;

use crate::{validate, LeadFilter, LeadStore, LeadStoreError, LeadStoreResult};

/// In-memory lead store for testing purposes.
#[derive(Debug, Default, Clone)]
pub struct MemoryLeadStore {
    leads: Arc<RwLock<HashMap<String, Lead>>>,
}

impl MemoryLeadStore {
    /// Creates a new in-memory lead store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored leads.
    pub async fn len(&self) -> usize {
        self.leads.read().await.len()
    }

    /// Returns true if no lead is stored.
    pub async fn is_empty(&self) -> bool {
        self.leads.read().await.is_empty()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn create_lead(&self, fields: NewLead) -> LeadStoreResult<Lead> {
        validate::new_lead(&fields)?;

        let lead = fields.into_lead(Utc::now());
        let mut leads = self.leads.write().await;
        leads.insert(lead.id.clone(), lead.clone());
        Ok(lead)
    }

    async fn find_leads(&self, filter: &LeadFilter) -> LeadStoreResult<Vec<Lead>> {
        let leads = self.leads.read().await;
        Ok(leads
            .values()
            .filter(|lead| filter.matches(lead))
            .cloned()
            .collect())
    }

    async fn update_lead(&self, id: &str, patch: LeadPatch) -> LeadStoreResult<Lead> {
        validate::patch(&patch)?;

        let mut leads = self.leads.write().await;
        let lead = leads
            .get_mut(id)
            .ok_or_else(|| LeadStoreError::not_found("Lead", id))?;
        patch.apply(lead);
        lead.updated_at = Utc::now();
        Ok(lead.clone())
    }

    async fn delete_lead(&self, id: &str) -> LeadStoreResult<()> {
        let mut leads = self.leads.write().await;
        if leads.remove(id).is_none() {
            return Err(LeadStoreError::not_found("Lead", id));
        }
        Ok(())
    }

    async fn update_leads(&self, filter: &LeadFilter, patch: &LeadPatch) -> LeadStoreResult<u64> {
        validate::patch(patch)?;

        let mut leads = self.leads.write().await;
        let now = Utc::now();
        let mut modified = 0;
        for lead in leads.values_mut().filter(|lead| filter.matches(lead)) {
            if patch.apply(lead) {
                lead.updated_at = now;
                modified += 1;
            }
        }
        Ok(modified)
    }

    async fn delete_leads(&self, filter: &LeadFilter) -> LeadStoreResult<u64> {
        let mut leads = self.leads.write().await;
        let before = leads.len();
        leads.retain(|_, lead| !filter.matches(lead));
        Ok((before - leads.len()) as u64)
    }

    async fn ping(&self) -> LeadStoreResult<()> {
        Ok(())
    }
}
