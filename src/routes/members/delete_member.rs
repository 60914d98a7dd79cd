use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ApiError, ConflictError, MemberId, MemberStoreError},
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

/// Removes a membership. Anyone may remove themselves; removing someone
/// else takes Admin. The last membership of a workspace can never be
/// removed, so a workspace always has at least one member.
#[tracing::instrument(name = "Delete member route handler", skip_all)]
pub async fn delete_member(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(member_id): Path<String>,
) -> Result<(StatusCode, Json<DataResponse<DeleteMemberResponse>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let member_id = MemberId::parse(&member_id)?;

    let target = state
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

    let caller = authorize(
        &state.member_store,
        &target.workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    if caller.id != target.id && !caller.is_admin() {
        return Err(ApiError::Unauthorized);
    }

    let member_count = state
        .member_store
        .read()
        .await
        .count_members(&target.workspace_id)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;
    if member_count <= 1 {
        return Err(ApiError::Conflict(ConflictError::LastMemberRemoval));
    }

    state
        .member_store
        .write()
        .await
        .delete_member(&member_id)
        .await
        .map_err(|e| match e {
            MemberStoreError::MemberNotFound => {
                ApiError::NotFound(*member_id.as_ref())
            }
            e => ApiError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(DataResponse::new(DeleteMemberResponse {
        id: member_id.as_ref().to_string(),
    }));

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteMemberResponse {
    pub id: String,
}
