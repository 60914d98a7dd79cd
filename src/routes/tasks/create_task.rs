use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{
        ApiError, MemberId, Position, ProjectId, Task, TaskName, TaskStatus,
        WorkspaceId,
    },
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

use super::TaskResponse;

/// Creates a task at the bottom of its (workspace, status) column: one
/// step past the column's highest position, or the first step for an
/// empty column.
#[tracing::instrument(name = "Create task route handler", skip_all)]
pub async fn create_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<DataResponse<TaskResponse>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let workspace_id = WorkspaceId::parse(&request.workspace_id)?;
    let project_id = ProjectId::parse(&request.project_id)?;
    let assignee_id = MemberId::parse(&request.assignee_id)?;
    let name = TaskName::parse(&request.name)?;
    let status: TaskStatus = request.status.parse()?;

    authorize(
        &state.member_store,
        &workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    let highest = state
        .task_store
        .read()
        .await
        .highest_position(&workspace_id, status)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    let task = Task::new(
        workspace_id,
        project_id,
        name,
        status,
        assignee_id,
        request.description,
        request.due_date,
        Position::after(highest),
    );

    state
        .task_store
        .write()
        .await
        .add_task(task.clone())
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    let response = Json(DataResponse::new(TaskResponse::from(task)));

    Ok((StatusCode::CREATED, response))
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub name: String,
    pub status: String,
    pub workspace_id: String,
    pub project_id: String,
    pub assignee_id: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}
