//! Document table layout and row mapping.

use entities::Lead;
use sqlx::FromRow;

use crate::LeadStoreResult;

/// Leads are kept as JSON documents keyed by ID. Fields are queried with
/// `json_extract`; only the group tag is indexed.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS leads (
    id TEXT PRIMARY KEY NOT NULL,
    document TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_leads_group ON leads (json_extract(document, '$.group'));
"#;

/// Database row for Lead
#[derive(Debug, FromRow)]
pub struct LeadRow {
    pub id: String,
    pub document: String,
}

impl LeadRow {
    /// Serializes a lead into its stored form.
    pub fn from_lead(lead: &Lead) -> LeadStoreResult<Self> {
        Ok(Self {
            id: lead.id.clone(),
            document: serde_json::to_string(lead)?,
        })
    }

    /// Decodes the stored document. The row ID wins over any ID in the body.
    pub fn into_lead(self) -> LeadStoreResult<Lead> {
        let mut lead: Lead = serde_json::from_str(&self.document)?;
        lead.id = self.id;
        Ok(lead)
    }
}
