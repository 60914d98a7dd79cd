use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{
        ApiError, ConflictError, Member, MemberRole, MemberStoreError,
        WorkspaceId, WorkspaceStoreError,
    },
    utils::auth::get_session_user,
    AppState, DataResponse,
};

use super::WorkspaceResponse;

#[tracing::instrument(name = "Join workspace route handler", skip_all)]
pub async fn join_workspace(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(workspace_id): Path<String>,
    Json(request): Json<JoinWorkspaceRequest>,
) -> Result<(StatusCode, Json<DataResponse<WorkspaceResponse>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let workspace_id = WorkspaceId::parse(&workspace_id)?;

    let existing = state
        .member_store
        .read()
        .await
        .find_membership(&workspace_id, &user_id)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;
    if existing.is_some() {
        return Err(ApiError::Conflict(ConflictError::AlreadyMember));
    }

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

    if !workspace.invite_code.matches(&request.code) {
        return Err(ApiError::Conflict(ConflictError::InvalidInviteCode));
    }

    let membership =
        Member::new(workspace_id.clone(), user_id, MemberRole::Member);

    state
        .member_store
        .write()
        .await
        .add_member(membership)
        .await
        .map_err(|e| match e {
            // Lost a race against another join with the same session.
            MemberStoreError::MembershipExists => {
                ApiError::Conflict(ConflictError::AlreadyMember)
            }
            e => ApiError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(DataResponse::new(WorkspaceResponse::from(workspace)));

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct JoinWorkspaceRequest {
    pub code: String,
}
