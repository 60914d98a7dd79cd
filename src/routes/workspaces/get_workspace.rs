use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use crate::{
    domain::{ApiError, WorkspaceId, WorkspaceStoreError},
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

use super::WorkspaceResponse;

#[tracing::instrument(name = "Get workspace route handler", skip_all)]
pub async fn get_workspace(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(workspace_id): Path<String>,
) -> Result<(StatusCode, Json<DataResponse<WorkspaceResponse>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let workspace_id = WorkspaceId::parse(&workspace_id)?;

    authorize(
        &state.member_store,
        &workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    let workspace = state
        .workspace_store
        .read()
        .await
        .get_workspace(&workspace_id)
        .await
        .map_err(|e| match e {
            WorkspaceStoreError::WorkspaceNotFound => {
                ApiError::NotFound(*workspace_id.as_ref())
            }
            e => ApiError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(DataResponse::new(WorkspaceResponse::from(workspace)));

    Ok((StatusCode::OK, response))
}
