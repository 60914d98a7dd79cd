use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ApiError, MemberId, MemberStoreError, Task},
    routes::projects::ProjectResponse,
    AppState,
};

mod bulk_update_tasks;
mod create_task;
mod delete_task;
mod get_task;
mod list_tasks;
mod update_task;

pub use bulk_update_tasks::*;
pub use create_task::*;
pub use delete_task::*;
pub use get_task::*;
pub use list_tasks::*;
pub use update_task::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: String,
    pub workspace_id: String,
    pub project_id: String,
    pub name: String,
    pub status: String,
    pub assignee_id: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.as_ref().to_string(),
            workspace_id: task.workspace_id.as_ref().to_string(),
            project_id: task.project_id.as_ref().to_string(),
            name: task.name.as_ref().to_owned(),
            status: task.status.to_string(),
            assignee_id: task.assignee_id.as_ref().to_string(),
            description: task.description,
            due_date: task.due_date,
            position: task.position.value_of(),
            created_at: task.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
}

/// Task plus the project and assignee the board UI renders alongside it.
/// The assignee is absent when their membership has since been removed.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskDetailResponse {
    #[serde(flatten)]
    pub task: TaskResponse,
    pub project: ProjectResponse,
    pub assignee: Option<AssigneeResponse>,
}

pub(crate) async fn assignee_summary(
    state: &AppState,
    assignee_id: &MemberId,
) -> Result<Option<AssigneeResponse>, ApiError> {
    let member = match state
        .member_store
        .read()
        .await
        .get_member(assignee_id)
        .await
    {
        Ok(member) => member,
        Err(MemberStoreError::MemberNotFound) => return Ok(None),
        Err(e) => return Err(ApiError::UnexpectedError(eyre!(e))),
    };

    let profile = state
        .user_directory
        .get_profile(&member.user_id)
        .await
        .map_err(ApiError::UnexpectedError)?;

    Ok(Some(AssigneeResponse {
        id: member.id.as_ref().to_string(),
        user_id: member.user_id.as_ref().to_string(),
        name: profile.display_name().to_owned(),
        email: profile.email,
    }))
}
