use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ApiError, ProjectId, ProjectStoreError},
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

/// Deletes a project along with its tasks.
#[tracing::instrument(name = "Delete project route handler", skip_all)]
pub async fn delete_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(project_id): Path<String>,
) -> Result<(StatusCode, Json<DataResponse<DeleteProjectResponse>>), ApiError>
{
    let user_id = get_session_user(&jar)?;
    let project_id = ProjectId::parse(&project_id)?;

    let not_found = |e| match e {
        ProjectStoreError::ProjectNotFound => {
            ApiError::NotFound(*project_id.as_ref())
        }
        e => ApiError::UnexpectedError(eyre!(e)),
    };

    let project = state
        .project_store
        .read()
        .await
        .get_project(&project_id)
        .await
        .map_err(not_found)?;

    authorize(
        &state.member_store,
        &project.workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    state
        .task_store
        .write()
        .await
        .delete_tasks_in_project(&project_id)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    state
        .project_store
        .write()
        .await
        .delete_project(&project_id)
        .await
        .map_err(not_found)?;

    let response = Json(DataResponse::new(DeleteProjectResponse {
        id: project_id.as_ref().to_string(),
    }));

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteProjectResponse {
    pub id: String,
}
