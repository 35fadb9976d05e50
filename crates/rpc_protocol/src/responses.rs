//! RPC response types.

use entities::Lead;
use serde::{Deserialize, Serialize};

// ============================================================================
// Lead Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLeadsResponse {
    pub leads: Vec<Lead>,
}

/// Options available in the table view dropdowns, computed from the leads
/// before filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    pub statuses: Vec<String>,
    pub sources: Vec<String>,
    pub temperatures: Vec<String>,
    /// Sales reps with at least one lead.
    pub assignees: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchLeadsResponse {
    pub leads: Vec<Lead>,
    pub options: FilterOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeadResponse {
    pub lead: Lead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLeadResponse {
    pub lead: Lead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLeadResponse {
    pub success: bool,
}

// ============================================================================
// Group Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListGroupsResponse {
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGroupResponse {
    pub success: bool,
    pub deleted_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameGroupResponse {
    pub success: bool,
    pub modified_count: u64,
}
