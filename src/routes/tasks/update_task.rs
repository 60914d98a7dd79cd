use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{
        ApiError, MemberId, ProjectId, TaskId, TaskName, TaskStatus,
        TaskStoreError,
    },
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

use super::TaskResponse;

/// Partial update. Absent fields keep their stored values; position is
/// deliberately not editable here, only through bulk reordering.
#[tracing::instrument(name = "Update task route handler", skip_all)]
pub async fn update_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(task_id): Path<String>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<(StatusCode, Json<DataResponse<TaskResponse>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let task_id = TaskId::parse(&task_id)?;

    let not_found = |e| match e {
        TaskStoreError::TaskNotFound => ApiError::NotFound(*task_id.as_ref()),
        e => ApiError::UnexpectedError(eyre!(e)),
    };

    let mut task = state
        .task_store
        .read()
        .await
        .get_task(&task_id)
        .await
        .map_err(not_found)?;

    authorize(
        &state.member_store,
        &task.workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    if let Some(name) = &request.name {
        task.name = TaskName::parse(name)?;
    }
    if let Some(status) = &request.status {
        task.status = status.parse::<TaskStatus>()?;
    }
    if let Some(project_id) = &request.project_id {
        task.project_id = ProjectId::parse(project_id)?;
    }
    if let Some(assignee_id) = &request.assignee_id {
        task.assignee_id = MemberId::parse(assignee_id)?;
    }
    if let Some(due_date) = request.due_date {
        task.due_date = due_date;
    }
    if let Some(description) = request.description {
        task.description =
            (!description.is_empty()).then_some(description);
    }

    state
        .task_store
        .write()
        .await
        .update_task(&task)
        .await
        .map_err(not_found)?;

    let response = Json(DataResponse::new(TaskResponse::from(task)));

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
}
