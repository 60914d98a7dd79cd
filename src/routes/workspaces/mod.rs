use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Workspace;

mod create_workspace;
mod delete_workspace;
mod get_workspace;
mod get_workspace_info;
mod join_workspace;
mod list_workspaces;
mod reset_invite_code;
mod update_workspace;
mod workspace_analytics;

pub use create_workspace::*;
pub use delete_workspace::*;
pub use get_workspace::*;
pub use get_workspace_info::*;
pub use join_workspace::*;
pub use list_workspaces::*;
pub use reset_invite_code::*;
pub use update_workspace::*;
pub use workspace_analytics::*;

/// Workspace as seen by its members. The invite code is included; only
/// the unauthenticated info endpoint withholds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceResponse {
    pub id: String,
    pub name: String,
    pub owner_user_id: String,
    pub image_url: Option<String>,
    pub invite_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<Workspace> for WorkspaceResponse {
    fn from(workspace: Workspace) -> Self {
        Self {
            id: workspace.id.as_ref().to_string(),
            name: workspace.name.as_ref().to_owned(),
            owner_user_id: workspace.owner_user_id.as_ref().to_string(),
            image_url: workspace.image_url,
            invite_code: workspace.invite_code.as_ref().to_owned(),
            created_at: workspace.created_at,
        }
    }
}
