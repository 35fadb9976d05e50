//! SQLite-backed document store for leads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{Lead, LeadPatch, NewLead};
use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::{
    schema::LeadRow, validate, FieldValue, Gateway, LeadFilter, LeadStore, LeadStoreError,
    LeadStoreResult,
};

/// Lead store persisting JSON documents through a [`Gateway`].
///
/// Updates are single statements that set only the patched document fields,
/// so concurrent writers to different fields of one lead never undo each
/// other.
pub struct SqliteLeadStore {
    gateway: Gateway,
}

impl SqliteLeadStore {
    /// Creates a store over the given gateway. Connection happens on first use.
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Returns the underlying gateway.
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    async fn fetch(&self, pool: &Pool<Sqlite>, filter: &LeadFilter) -> LeadStoreResult<Vec<Lead>> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT id, document FROM leads");
        push_filter(&mut query, filter);

        let rows: Vec<LeadRow> = query.build_query_as::<LeadRow>().fetch_all(pool).await?;
        rows.into_iter().map(LeadRow::into_lead).collect()
    }
}

/// Patched fields as (stored name, JSON text) pairs.
fn patch_fields(patch: &LeadPatch) -> LeadStoreResult<Vec<(String, String)>> {
    let serde_json::Value::Object(fields) = serde_json::to_value(patch)? else {
        return Err(LeadStoreError::Other("lead patch is not an object".to_string()));
    };
    fields
        .into_iter()
        .map(|(field, value)| Ok::<_, LeadStoreError>((field, serde_json::to_string(&value)?)))
        .collect()
}

/// Appends `json_set(document, ...)` writing each field and `updatedAt`.
fn push_json_set(
    query: &mut QueryBuilder<'_, Sqlite>,
    fields: &[(String, String)],
    now: DateTime<Utc>,
) -> LeadStoreResult<()> {
    query.push("json_set(document");
    for (field, json) in fields {
        // Field names come from LeadPatch's serde names, never from callers.
        query
            .push(", '$.")
            .push(field)
            .push("', json(")
            .push_bind(json.clone())
            .push(")");
    }
    query
        .push(", '$.updatedAt', json(")
        .push_bind(serde_json::to_string(&now)?)
        .push("))");
    Ok(())
}

/// Appends a WHERE clause for every set filter field. Returns the separator
/// for any further condition.
fn push_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: &LeadFilter) -> &'static str {
    let mut separator = " WHERE ";
    if let Some(id) = &filter.id {
        query.push(separator).push("id = ").push_bind(id.clone());
        separator = " AND ";
    }
    for (field, value) in filter.document_conditions() {
        query
            .push(separator)
            .push("json_extract(document, '$.")
            .push(field)
            .push("') = ");
        match value {
            FieldValue::Text(text) => query.push_bind(text),
            FieldValue::Number(number) => query.push_bind(number),
        };
        separator = " AND ";
    }
    separator
}

#[async_trait]
impl LeadStore for SqliteLeadStore {
    async fn create_lead(&self, fields: NewLead) -> LeadStoreResult<Lead> {
        validate::new_lead(&fields)?;
        let pool = self.gateway.ensure_connected().await?;

        let lead = fields.into_lead(Utc::now());
        let row = LeadRow::from_lead(&lead)?;
        sqlx::query("INSERT INTO leads (id, document) VALUES (?, ?)")
            .bind(&row.id)
            .bind(&row.document)
            .execute(pool)
            .await?;

        tracing::debug!(lead_id = %lead.id, "Lead inserted");
        Ok(lead)
    }

    async fn find_leads(&self, filter: &LeadFilter) -> LeadStoreResult<Vec<Lead>> {
        let pool = self.gateway.ensure_connected().await?;
        self.fetch(pool, filter).await
    }

    async fn update_lead(&self, id: &str, patch: LeadPatch) -> LeadStoreResult<Lead> {
        validate::patch(&patch)?;
        let pool = self.gateway.ensure_connected().await?;

        let fields = patch_fields(&patch)?;
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE leads SET document = ");
        push_json_set(&mut query, &fields, Utc::now())?;
        query
            .push(" WHERE id = ")
            .push_bind(id.to_string())
            .push(" RETURNING id, document");

        query
            .build_query_as::<LeadRow>()
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| LeadStoreError::not_found("Lead", id))?
            .into_lead()
    }

    async fn delete_lead(&self, id: &str) -> LeadStoreResult<()> {
        let pool = self.gateway.ensure_connected().await?;

        let result = sqlx::query("DELETE FROM leads WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(LeadStoreError::not_found("Lead", id));
        }
        Ok(())
    }

    async fn update_leads(&self, filter: &LeadFilter, patch: &LeadPatch) -> LeadStoreResult<u64> {
        validate::patch(patch)?;
        let pool = self.gateway.ensure_connected().await?;

        let fields = patch_fields(patch)?;
        if fields.is_empty() {
            return Ok(0);
        }

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE leads SET document = ");
        push_json_set(&mut query, &fields, Utc::now())?;
        let separator = push_filter(&mut query, filter);

        // Only rows where some patched field differs, so the count is what changed.
        query.push(separator).push("(");
        for (i, (field, json)) in fields.iter().enumerate() {
            if i > 0 {
                query.push(" OR ");
            }
            query
                .push("json_extract(document, '$.")
                .push(field)
                .push("') IS NOT json_extract(")
                .push_bind(json.clone())
                .push(", '$')");
        }
        query.push(")");

        let result = query.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete_leads(&self, filter: &LeadFilter) -> LeadStoreResult<u64> {
        let pool = self.gateway.ensure_connected().await?;

        let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM leads");
        push_filter(&mut query, filter);
        let result = query.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> LeadStoreResult<()> {
        self.gateway.ping().await
    }
}

#[cfg(test)]
mod tests {
    use entities::{LeadStatus, Temperature};

    use super::*;
    use crate::schema::tests::temp_database_url;

    fn store() -> SqliteLeadStore {
        SqliteLeadStore::new(Gateway::new(temp_database_url()))
    }

    fn lead(name: &str, status: LeadStatus, source: &str, group: &str) -> NewLead {
        NewLead::new(name, "Tech Corp", format!("{}@techcorp.com", name.to_lowercase()))
            .with_status(status)
            .with_source(source)
            .with_group(group)
    }

    #[tokio::test]
    async fn test_create_then_find_by_id() {
        let store = store();
        let created = store
            .create_lead(lead("Alice", LeadStatus::New, "Web", "Sales").with_value(1200.5))
            .await
            .unwrap();

        let found = store
            .find_leads(&LeadFilter::new().with_id(created.id.clone()))
            .await
            .unwrap();
        assert_eq!(found, vec![created]);
    }

    #[tokio::test]
    async fn test_invalid_create_never_connects() {
        let store = store();
        let err = store
            .create_lead(lead("", LeadStatus::New, "Web", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, LeadStoreError::Validation(_)));
        assert!(!store.gateway().is_connected());
    }

    #[tokio::test]
    async fn test_filter_on_document_fields() {
        let store = store();
        let a = store
            .create_lead(lead("A", LeadStatus::New, "Web", "Sales"))
            .await
            .unwrap();
        store
            .create_lead(lead("B", LeadStatus::New, "Referral", "Sales"))
            .await
            .unwrap();
        store
            .create_lead(lead("C", LeadStatus::Qualified, "Web", "Marketing"))
            .await
            .unwrap();

        let filter = LeadFilter::new()
            .with_status(LeadStatus::New)
            .with_source("Web");
        let found = store.find_leads(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, a.id);

        let sales = store
            .find_leads(&LeadFilter::new().with_group("Sales"))
            .await
            .unwrap();
        assert_eq!(sales.len(), 2);

        let all = store.find_leads(&LeadFilter::new()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = store();
        let created = store
            .create_lead(lead("Alice", LeadStatus::New, "Web", "Sales"))
            .await
            .unwrap();

        let patch = LeadPatch {
            status: Some(LeadStatus::ClosedWon),
            temperature: Some(Temperature::Hot),
            ..Default::default()
        };
        let updated = store.update_lead(&created.id, patch).await.unwrap();
        assert_eq!(updated.status, LeadStatus::ClosedWon);
        assert_eq!(updated.source, "Web");

        let won = store
            .find_leads(&LeadFilter::new().with_status(LeadStatus::ClosedWon))
            .await
            .unwrap();
        assert_eq!(won, vec![updated]);

        store.delete_lead(&created.id).await.unwrap();
        let err = store.delete_lead(&created.id).await.unwrap_err();
        assert!(matches!(err, LeadStoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = store();
        let err = store
            .update_lead("missing", LeadPatch::group("Sales"))
            .await
            .unwrap_err();
        assert!(matches!(err, LeadStoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_bulk_operations() {
        let store = store();
        for name in ["A", "B"] {
            store
                .create_lead(lead(name, LeadStatus::New, "Web", "Sales"))
                .await
                .unwrap();
        }
        store
            .create_lead(lead("C", LeadStatus::New, "Web", "Marketing"))
            .await
            .unwrap();

        let modified = store
            .update_leads(
                &LeadFilter::new().with_group("Sales"),
                &LeadPatch::group("SalesTeam"),
            )
            .await
            .unwrap();
        assert_eq!(modified, 2);

        let removed = store
            .delete_leads(&LeadFilter::new().with_group("SalesTeam"))
            .await
            .unwrap();
        assert_eq!(removed, 2);

        let rest = store.find_leads(&LeadFilter::new()).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].group, "Marketing");
    }

    #[tokio::test]
    async fn test_bulk_update_counts_only_changed_rows() {
        let store = store();
        let moved = store
            .create_lead(lead("A", LeadStatus::New, "Web", "Sales"))
            .await
            .unwrap();
        store
            .create_lead(lead("B", LeadStatus::New, "Web", "Marketing"))
            .await
            .unwrap();

        let filter = LeadFilter::new().with_source("Web");
        let modified = store
            .update_leads(&filter, &LeadPatch::group("Marketing"))
            .await
            .unwrap();
        assert_eq!(modified, 1);

        let found = store
            .find_leads(&LeadFilter::new().with_id(moved.id.clone()))
            .await
            .unwrap();
        assert_eq!(found[0].group, "Marketing");
        assert_eq!(found[0].name, "A");
        assert!(found[0].updated_at >= moved.updated_at);

        let again = store
            .update_leads(&filter, &LeadPatch::group("Marketing"))
            .await
            .unwrap();
        assert_eq!(again, 0);
    }

    #[tokio::test]
    async fn test_filter_on_value_and_last_contact() {
        let store = store();
        let mut fields = lead("A", LeadStatus::New, "Web", "Sales").with_value(75000.0);
        fields.last_contact = chrono::NaiveDate::from_ymd_opt(2025, 7, 8);
        fields.phone = "+1-555-0123".to_string();
        let a = store.create_lead(fields).await.unwrap();
        store
            .create_lead(lead("B", LeadStatus::New, "Web", "Sales").with_value(10.0))
            .await
            .unwrap();

        let filter = LeadFilter {
            value: Some(75000.0),
            last_contact: chrono::NaiveDate::from_ymd_opt(2025, 7, 8),
            phone: Some("+1-555-0123".to_string()),
            ..Default::default()
        };
        let found = store.find_leads(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, a.id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_rename_and_field_update_do_not_undo_each_other() {
        let store = std::sync::Arc::new(store());
        let mut ids = Vec::new();
        for i in 0..100 {
            let created = store
                .create_lead(lead(&format!("Lead{i}"), LeadStatus::New, "Web", "Sales"))
                .await
                .unwrap();
            ids.push(created.id);
        }

        let renamer = {
            let store = store.clone();
            tokio::spawn(async move {
                crate::GroupDirectory::new(&*store)
                    .rename_group("Sales", "Team")
                    .await
            })
        };
        let updater = {
            let store = store.clone();
            tokio::spawn(async move {
                for id in ids {
                    let patch = LeadPatch {
                        notes: Some("called".to_string()),
                        ..Default::default()
                    };
                    store.update_lead(&id, patch).await?;
                }
                Ok::<_, LeadStoreError>(())
            })
        };

        let modified = renamer.await.unwrap().unwrap();
        updater.await.unwrap().unwrap();
        assert_eq!(modified, 100);

        let leads = store.find_leads(&LeadFilter::new()).await.unwrap();
        let lost_notes = leads.iter().filter(|l| l.notes != "called").count();
        let lost_group = leads.iter().filter(|l| l.group != "Team").count();
        assert_eq!((lost_notes, lost_group), (0, 0));
    }
}
