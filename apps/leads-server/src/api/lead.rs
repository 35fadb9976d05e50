//! Lead API endpoints.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use lead_store::{LeadField, LeadFilter, LeadQuery, LeadStore, Selection, distinct_values};
use rpc_protocol::{requests::*, responses::*};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

fn group_filter(group: Option<&str>) -> LeadFilter {
    match group.filter(|group| !group.is_empty()) {
        Some(group) => LeadFilter::new().with_group(group),
        None => LeadFilter::new(),
    }
}

fn require_id(id: &str) -> ServerResult<()> {
    if id.trim().is_empty() {
        return Err(ServerError::InvalidRequest("id is required".to_string()));
    }
    Ok(())
}

/// Lists leads, optionally restricted to one group.
pub async fn list_leads<S: LeadStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<ListLeadsRequest>, JsonRejection>,
) -> ServerResult<Json<ListLeadsResponse>> {
    let Json(request) = body?;

    let leads = state
        .store
        .find_leads(&group_filter(request.group_filter()))
        .await?;

    tracing::debug!(group = ?request.group_filter(), count = leads.len(), "Leads listed");

    Ok(Json(ListLeadsResponse { leads }))
}

/// Lists leads and applies the table view's search and dropdown filters.
pub async fn search_leads<S: LeadStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<SearchLeadsRequest>, JsonRejection>,
) -> ServerResult<Json<SearchLeadsResponse>> {
    let Json(request) = body?;

    let fetched = state
        .store
        .find_leads(&group_filter(request.group.as_deref()))
        .await?;

    let query = LeadQuery::new()
        .with_search(request.search)
        .with_status(Selection::from(request.status.as_deref()))
        .with_source(Selection::from(request.source.as_deref()))
        .with_temperature(Selection::from(request.temperature.as_deref()));

    let options = FilterOptions {
        statuses: distinct_values(&fetched, LeadField::Status).into_iter().collect(),
        sources: distinct_values(&fetched, LeadField::Source).into_iter().collect(),
        temperatures: distinct_values(&fetched, LeadField::Temperature)
            .into_iter()
            .collect(),
        assignees: distinct_values(&fetched, LeadField::AssignedTo)
            .into_iter()
            .collect(),
    };

    Ok(Json(SearchLeadsResponse {
        leads: query.apply(&fetched),
        options,
    }))
}

/// Creates a lead.
pub async fn create_lead<S: LeadStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<CreateLeadRequest>, JsonRejection>,
) -> ServerResult<Json<CreateLeadResponse>> {
    let Json(request) = body?;

    let lead = state.store.create_lead(request.lead).await?;

    tracing::info!(lead_id = %lead.id, group = %lead.group, "Lead created");

    Ok(Json(CreateLeadResponse { lead }))
}

/// Overwrites the supplied fields of a lead.
pub async fn update_lead<S: LeadStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<UpdateLeadRequest>, JsonRejection>,
) -> ServerResult<Json<UpdateLeadResponse>> {
    let Json(request) = body?;
    require_id(&request.id)?;

    let lead = state
        .store
        .update_lead(&request.id, request.fields)
        .await
        .inspect_err(|e| tracing::warn!(lead_id = %request.id, error = %e, "Lead update failed"))?;

    tracing::info!(lead_id = %lead.id, "Lead updated");

    Ok(Json(UpdateLeadResponse { lead }))
}

/// Deletes a lead.
pub async fn delete_lead<S: LeadStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<DeleteLeadRequest>, JsonRejection>,
) -> ServerResult<Json<DeleteLeadResponse>> {
    let Json(request) = body?;
    require_id(&request.id)?;

    state
        .store
        .delete_lead(&request.id)
        .await
        .inspect_err(|e| tracing::warn!(lead_id = %request.id, error = %e, "Lead delete failed"))?;

    tracing::info!(lead_id = %request.id, "Lead deleted");

    Ok(Json(DeleteLeadResponse { success: true }))
}
