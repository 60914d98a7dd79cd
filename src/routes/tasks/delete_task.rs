use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ApiError, TaskId, TaskStoreError},
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

#[tracing::instrument(name = "Delete task route handler", skip_all)]
pub async fn delete_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(task_id): Path<String>,
) -> Result<(StatusCode, Json<DataResponse<DeleteTaskResponse>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let task_id = TaskId::parse(&task_id)?;

    let not_found = |e| match e {
        TaskStoreError::TaskNotFound => ApiError::NotFound(*task_id.as_ref()),
        e => ApiError::UnexpectedError(eyre!(e)),
    };

    let task = state
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

    state
        .task_store
        .write()
        .await
        .delete_task(&task_id)
        .await
        .map_err(not_found)?;

    let response = Json(DataResponse::new(DeleteTaskResponse {
        id: task_id.as_ref().to_string(),
    }));

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub id: String,
}
