use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ApiError, WorkspaceId, WorkspaceStoreError},
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

/// Deletes a workspace and everything inside it. Children go first so a
/// failure part-way leaves no orphans pointing at a missing workspace.
#[tracing::instrument(name = "Delete workspace route handler", skip_all)]
pub async fn delete_workspace(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(workspace_id): Path<String>,
) -> Result<(StatusCode, Json<DataResponse<DeleteWorkspaceResponse>>), ApiError>
{
    let user_id = get_session_user(&jar)?;
    let workspace_id = WorkspaceId::parse(&workspace_id)?;

    authorize(
        &state.member_store,
        &workspace_id,
        &user_id,
        AccessLevel::Admin,
    )
    .await?;

    state
        .task_store
        .write()
        .await
        .delete_tasks_in_workspace(&workspace_id)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    state
        .project_store
        .write()
        .await
        .delete_projects_in_workspace(&workspace_id)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    state
        .member_store
        .write()
        .await
        .delete_members_in_workspace(&workspace_id)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    state
        .workspace_store
        .write()
        .await
        .delete_workspace(&workspace_id)
        .await
        .map_err(|e| match e {
            WorkspaceStoreError::WorkspaceNotFound => {
                ApiError::NotFound(*workspace_id.as_ref())
            }
            e => ApiError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(DataResponse::new(DeleteWorkspaceResponse {
        id: workspace_id.as_ref().to_string(),
    }));

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteWorkspaceResponse {
    pub id: String,
}
