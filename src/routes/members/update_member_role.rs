use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        ApiError, ConflictError, MemberId, MemberRole, MemberStoreError,
    },
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

/// Changes a member's role. Admin only. Refused outright while the
/// workspace has a single member, whatever the requested role, so a
/// workspace can never end up without an Admin.
#[tracing::instrument(name = "Update member role route handler", skip_all)]
pub async fn update_member_role(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(member_id): Path<String>,
    Json(request): Json<UpdateMemberRoleRequest>,
) -> Result<(StatusCode, Json<DataResponse<UpdateMemberRoleResponse>>), ApiError>
{
    let user_id = get_session_user(&jar)?;
    let member_id = MemberId::parse(&member_id)?;
    let role: MemberRole = request.role.parse()?;

    let mut target = state
        .member_store
        .read()
        .await
        .get_member(&member_id)
        .await
        .map_err(|e| match e {
            MemberStoreError::MemberNotFound => {
                ApiError::NotFound(*member_id.as_ref())
            }
            e => ApiError::UnexpectedError(eyre!(e)),
        })?;

    authorize(
        &state.member_store,
        &target.workspace_id,
        &user_id,
        AccessLevel::Admin,
    )
    .await?;

    let member_count = state
        .member_store
        .read()
        .await
        .count_members(&target.workspace_id)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;
    if member_count <= 1 {
        return Err(ApiError::Conflict(ConflictError::LastMemberDowngrade));
    }

    target.role = role;

    state
        .member_store
        .write()
        .await
        .update_member(&target)
        .await
        .map_err(|e| match e {
            MemberStoreError::MemberNotFound => {
                ApiError::NotFound(*member_id.as_ref())
            }
            e => ApiError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(DataResponse::new(UpdateMemberRoleResponse {
        id: member_id.as_ref().to_string(),
        role: target.role.to_string(),
    }));

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct UpdateMemberRoleRequest {
    pub role: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemberRoleResponse {
    pub id: String,
    pub role: String,
}
