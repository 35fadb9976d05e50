//! Lead entity definitions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LeadStatus, Temperature};

/// A single sales opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Store-assigned unique identifier.
    pub id: String,
    /// Contact name.
    pub name: String,
    /// Company the contact works for.
    pub company: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Pipeline status.
    pub status: LeadStatus,
    pub temperature: Temperature,
    /// Where the lead came from (free text, e.g. "Website").
    #[serde(default)]
    pub source: String,
    /// Estimated deal value.
    #[serde(default)]
    pub value: f64,
    /// Date of the most recent contact.
    pub last_contact: NaiveDate,
    /// Sales rep owning the lead.
    #[serde(default)]
    pub assigned_to: String,
    /// Free-text group tag. Empty means ungrouped.
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub project: String,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a lead.
///
/// Required fields are still optional or empty-able here so that a missing
/// value can be reported as a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewLead {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub status: Option<LeadStatus>,
    pub temperature: Option<Temperature>,
    pub source: String,
    pub value: Option<f64>,
    pub last_contact: Option<NaiveDate>,
    pub assigned_to: String,
    pub group: String,
    pub notes: String,
    pub project: String,
}

impl NewLead {
    /// Creates a field set with the required strings and the default status
    /// and temperature.
    pub fn new(
        name: impl Into<String>,
        company: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            email: email.into(),
            status: Some(LeadStatus::default()),
            temperature: Some(Temperature::default()),
            ..Default::default()
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: Temperature) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the group tag.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Sets the assigned sales rep.
    pub fn with_assigned_to(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = assigned_to.into();
        self
    }

    /// Sets the deal value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Builds the stored record with a fresh id.
    ///
    /// Callers validate first; a missing status or temperature falls back to
    /// the enum default.
    pub fn into_lead(self, now: DateTime<Utc>) -> Lead {
        Lead {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            company: self.company,
            email: self.email,
            phone: self.phone,
            status: self.status.unwrap_or_default(),
            temperature: self.temperature.unwrap_or_default(),
            source: self.source,
            value: self.value.unwrap_or(0.0),
            last_contact: self.last_contact.unwrap_or_else(|| now.date_naive()),
            assigned_to: self.assigned_to,
            group: self.group,
            notes: self.notes,
            project: self.project,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a lead. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl LeadPatch {
    /// Creates a patch that only moves a lead to another group.
    pub fn group(group: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            ..Default::default()
        }
    }

    /// Returns true if the patch touches no field.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrites the supplied fields on `lead`.
    ///
    /// Returns true if any field value actually changed. Timestamps are left
    /// to the caller.
    pub fn apply(&self, lead: &mut Lead) -> bool {
        let mut changed = false;
        overwrite(&mut lead.name, &self.name, &mut changed);
        overwrite(&mut lead.company, &self.company, &mut changed);
        overwrite(&mut lead.email, &self.email, &mut changed);
        overwrite(&mut lead.phone, &self.phone, &mut changed);
        overwrite(&mut lead.status, &self.status, &mut changed);
        overwrite(&mut lead.temperature, &self.temperature, &mut changed);
        overwrite(&mut lead.source, &self.source, &mut changed);
        overwrite(&mut lead.value, &self.value, &mut changed);
        overwrite(&mut lead.last_contact, &self.last_contact, &mut changed);
        overwrite(&mut lead.assigned_to, &self.assigned_to, &mut changed);
        overwrite(&mut lead.group, &self.group, &mut changed);
        overwrite(&mut lead.notes, &self.notes, &mut changed);
        overwrite(&mut lead.project, &self.project, &mut changed);
        changed
    }
}

fn overwrite<T: PartialEq + Clone>(slot: &mut T, value: &Option<T>, changed: &mut bool) {
    if let Some(value) = value {
        if slot != value {
            *slot = value.clone();
            *changed = true;
        }
    }
}
