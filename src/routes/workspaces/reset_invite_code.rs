use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use crate::{
    domain::{ApiError, InviteCode, WorkspaceId, WorkspaceStoreError},
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

use super::WorkspaceResponse;

/// Replaces the invite code. Outstanding copies of the old code stop
/// working immediately.
#[tracing::instrument(name = "Reset invite code route handler", skip_all)]
pub async fn reset_invite_code(
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
        AccessLevel::Admin,
    )
    .await?;

    let not_found = |e| match e {
        WorkspaceStoreError::WorkspaceNotFound => {
            ApiError::NotFound(*workspace_id.as_ref())
        }
        e => ApiError::UnexpectedError(eyre!(e)),
    };

    let mut workspace = state
        .workspace_store
        .read()
        .await
        .get_workspace(&workspace_id)
        .await
        .map_err(not_found)?;

    workspace.invite_code = InviteCode::generate();

    state
        .workspace_store
        .write()
        .await
        .update_workspace(&workspace)
        .await
        .map_err(not_found)?;

    let response = Json(DataResponse::new(WorkspaceResponse::from(workspace)));

    Ok((StatusCode::OK, response))
}
