//! Lead store trait definitions.

use async_trait::async_trait;
use chrono::NaiveDate;
use entities::{Lead, LeadPatch, LeadStatus, NewLead, Temperature};

use crate::LeadStoreResult;

/// Exact-match filter over lead fields. Unset fields match everything, so
/// the default filter selects every lead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilter {
    /// Filter by lead ID.
    pub id: Option<String>,
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Filter by pipeline status.
    pub status: Option<LeadStatus>,
    pub temperature: Option<Temperature>,
    pub source: Option<String>,
    /// Filter by exact deal value.
    pub value: Option<f64>,
    pub last_contact: Option<NaiveDate>,
    pub assigned_to: Option<String>,
    /// Filter by group tag.
    pub group: Option<String>,
    pub notes: Option<String>,
    pub project: Option<String>,
}

/// Value a document field is compared against.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl LeadFilter {
    /// Creates a filter that matches every lead.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to a single ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Restricts the filter to one group tag.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Restricts the filter to one status.
    pub fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to one temperature.
    pub fn with_temperature(mut self, temperature: Temperature) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Restricts the filter to one source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Conditions on document fields, keyed by their stored (camelCase) name.
    /// The ID is not included; it lives outside the document body.
    pub fn document_conditions(&self) -> Vec<(&'static str, FieldValue)> {
        let mut conditions = Vec::new();
        let strings = [
            ("name", &self.name),
            ("company", &self.company),
            ("email", &self.email),
            ("phone", &self.phone),
            ("source", &self.source),
            ("assignedTo", &self.assigned_to),
            ("group", &self.group),
            ("notes", &self.notes),
            ("project", &self.project),
        ];
        for (field, value) in strings {
            if let Some(value) = value {
                conditions.push((field, FieldValue::Text(value.clone())));
            }
        }
        if let Some(status) = self.status {
            conditions.push(("status", FieldValue::Text(status.as_str().to_string())));
        }
        if let Some(temperature) = self.temperature {
            conditions.push((
                "temperature",
                FieldValue::Text(temperature.as_str().to_string()),
            ));
        }
        if let Some(value) = self.value {
            conditions.push(("value", FieldValue::Number(value)));
        }
        if let Some(last_contact) = self.last_contact {
            // Same YYYY-MM-DD form the document stores.
            conditions.push(("lastContact", FieldValue::Text(last_contact.to_string())));
        }
        conditions
    }

    /// Returns true if the lead satisfies every set condition.
    pub fn matches(&self, lead: &Lead) -> bool {
        fn eq(expected: &Option<String>, actual: &str) -> bool {
            expected.as_deref().is_none_or(|e| e == actual)
        }

        eq(&self.id, &lead.id)
            && eq(&self.name, &lead.name)
            && eq(&self.company, &lead.company)
            && eq(&self.email, &lead.email)
            && eq(&self.phone, &lead.phone)
            && self.status.is_none_or(|s| lead.status == s)
            && self.temperature.is_none_or(|t| lead.temperature == t)
            && eq(&self.source, &lead.source)
            && self.value.is_none_or(|v| lead.value == v)
            && self.last_contact.is_none_or(|d| lead.last_contact == d)
            && eq(&self.assigned_to, &lead.assigned_to)
            && eq(&self.group, &lead.group)
            && eq(&self.notes, &lead.notes)
            && eq(&self.project, &lead.project)
    }
}

/// Trait for lead storage operations.
///
/// Every call is an independent round trip to the store. No operation takes
/// locks across calls or detects concurrent modification; the last writer
/// wins.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Validates and persists a new lead, returning it with its assigned ID.
    async fn create_lead(&self, fields: NewLead) -> LeadStoreResult<Lead>;

    /// Lists leads matching the filter. Order is store-defined.
    async fn find_leads(&self, filter: &LeadFilter) -> LeadStoreResult<Vec<Lead>>;

    /// Overwrites the supplied fields and returns the updated lead.
    async fn update_lead(&self, id: &str, patch: LeadPatch) -> LeadStoreResult<Lead>;

    /// Deletes a lead.
    async fn delete_lead(&self, id: &str) -> LeadStoreResult<()>;

    /// Applies a patch to every matching lead. Returns how many leads
    /// actually changed.
    async fn update_leads(&self, filter: &LeadFilter, patch: &LeadPatch) -> LeadStoreResult<u64>;

    /// Deletes every matching lead. Returns how many were removed.
    async fn delete_leads(&self, filter: &LeadFilter) -> LeadStoreResult<u64>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> LeadStoreResult<()>;
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_default_filter_matches_everything() {
        let lead = NewLead::new("John Doe", "Tech Corp", "john@techcorp.com").into_lead(Utc::now());
        assert!(LeadFilter::new().matches(&lead));
        assert!(LeadFilter::new().document_conditions().is_empty());
    }

    #[test]
    fn test_filter_matches_all_conditions() {
        let lead = NewLead::new("John Doe", "Tech Corp", "john@techcorp.com")
            .with_group("Sales")
            .with_source("Website")
            .into_lead(Utc::now());

        let filter = LeadFilter::new().with_group("Sales").with_source("Website");
        assert!(filter.matches(&lead));

        let filter = filter.with_status(LeadStatus::Qualified);
        assert!(!filter.matches(&lead));

        assert!(LeadFilter::new().with_id(lead.id.clone()).matches(&lead));
        assert!(!LeadFilter::new().with_id("other").matches(&lead));
    }

    #[test]
    fn test_document_conditions_use_stored_names() {
        let filter = LeadFilter {
            assigned_to: Some("Sarah Manager".to_string()),
            status: Some(LeadStatus::ClosedWon),
            id: Some("ignored".to_string()),
            ..Default::default()
        };
        let conditions = filter.document_conditions();

        assert_eq!(conditions.len(), 2);
        assert!(conditions.contains(&(
            "assignedTo",
            FieldValue::Text("Sarah Manager".to_string())
        )));
        assert!(conditions.contains(&("status", FieldValue::Text("Closed Won".to_string()))));
    }

    #[test]
    fn test_filter_on_every_document_field() {
        let mut lead = NewLead::new("John Doe", "Tech Corp", "john@techcorp.com")
            .with_value(50000.0)
            .into_lead(Utc::now());
        lead.phone = "+1-555-0123".to_string();
        lead.notes = "Interested in enterprise plan".to_string();
        lead.last_contact = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();

        let filter = LeadFilter {
            phone: Some("+1-555-0123".to_string()),
            notes: Some("Interested in enterprise plan".to_string()),
            value: Some(50000.0),
            last_contact: NaiveDate::from_ymd_opt(2025, 7, 10),
            ..Default::default()
        };
        assert!(filter.matches(&lead));

        let conditions = filter.document_conditions();
        assert_eq!(conditions.len(), 4);
        assert!(conditions.contains(&("value", FieldValue::Number(50000.0))));
        assert!(conditions.contains(&("lastContact", FieldValue::Text("2025-07-10".to_string()))));

        let other_value = LeadFilter {
            value: Some(1.0),
            ..filter.clone()
        };
        assert!(!other_value.matches(&lead));
    }
}
