//! RPC request types.

use entities::{LeadPatch, NewLead};
use serde::{Deserialize, Serialize};

// ============================================================================
// Lead Requests
// ============================================================================

/// `getLeads(group?)`. A missing, null or empty group lists every lead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListLeadsRequest {
    pub group: Option<String>,
}

impl ListLeadsRequest {
    /// The group to filter by, if any.
    pub fn group_filter(&self) -> Option<&str> {
        self.group.as_deref().filter(|group| !group.is_empty())
    }
}

/// Server-side search over one group (or all leads), mirroring the table view
/// filters. Selections use `"all"` to mean no restriction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchLeadsRequest {
    pub group: Option<String>,
    pub search: String,
    pub status: Option<String>,
    pub source: Option<String>,
    pub temperature: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeadRequest {
    pub lead: NewLead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLeadRequest {
    pub id: String,
    pub fields: LeadPatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLeadRequest {
    pub id: String,
}

// ============================================================================
// Group Requests
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListGroupsRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGroupRequest {
    pub group_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameGroupRequest {
    pub old_name: String,
    pub new_name: String,
}
