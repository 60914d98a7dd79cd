use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use crate::{
    domain::{ApiError, TaskId, TaskStoreError},
    routes::projects::ProjectResponse,
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

use super::{assignee_summary, TaskDetailResponse, TaskResponse};

#[tracing::instrument(name = "Get task route handler", skip_all)]
pub async fn get_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(task_id): Path<String>,
) -> Result<(StatusCode, Json<DataResponse<TaskDetailResponse>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let task_id = TaskId::parse(&task_id)?;

    let task = state
        .task_store
        .read()
        .await
        .get_task(&task_id)
        .await
        .map_err(|e| match e {
            TaskStoreError::TaskNotFound => {
                ApiError::NotFound(*task_id.as_ref())
            }
            e => ApiError::UnexpectedError(eyre!(e)),
        })?;

    authorize(
        &state.member_store,
        &task.workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    let project = state
        .project_store
        .read()
        .await
        .get_project(&task.project_id)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    let assignee = assignee_summary(&state, &task.assignee_id).await?;

    let response = Json(DataResponse::new(TaskDetailResponse {
        task: TaskResponse::from(task),
        project: ProjectResponse::from(project),
        assignee,
    }));

    Ok((StatusCode::OK, response))
}
