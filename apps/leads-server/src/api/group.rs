//! Group API endpoints.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use lead_store::{GroupDirectory, LeadStore};
use rpc_protocol::{requests::*, responses::*};

use crate::error::ServerResult;
use crate::state::AppState;

/// Lists the distinct group names in use.
pub async fn list_groups<S: LeadStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<ListGroupsRequest>, JsonRejection>,
) -> ServerResult<Json<ListGroupsResponse>> {
    let Json(_request) = body?;

    let groups = GroupDirectory::new(&state.store)
        .list_distinct_groups()
        .await?;

    Ok(Json(ListGroupsResponse {
        groups: groups.into_iter().collect(),
    }))
}

/// Deletes every lead in a group.
pub async fn delete_group<S: LeadStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<DeleteGroupRequest>, JsonRejection>,
) -> ServerResult<Json<DeleteGroupResponse>> {
    let Json(request) = body?;

    let deleted_count = GroupDirectory::new(&state.store)
        .delete_group(&request.group_name)
        .await?;

    Ok(Json(DeleteGroupResponse {
        success: true,
        deleted_count,
    }))
}

/// Renames a group by retagging its leads.
pub async fn rename_group<S: LeadStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<RenameGroupRequest>, JsonRejection>,
) -> ServerResult<Json<RenameGroupResponse>> {
    let Json(request) = body?;

    let modified_count = GroupDirectory::new(&state.store)
        .rename_group(&request.old_name, &request.new_name)
        .await?;

    Ok(Json(RenameGroupResponse {
        success: true,
        modified_count,
    }))
}
