use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ApiError, WorkspaceId},
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

#[derive(Deserialize)]
pub struct ListMembersQueryParams {
    #[serde(rename = "workspaceId")]
    workspace_id: uuid::Uuid,
}

/// Lists a workspace's members, enriched with display names and emails
/// from the user directory. A member whose directory record has no name
/// falls back to their email address.
#[tracing::instrument(name = "List members route handler", skip_all)]
pub async fn list_members(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<ListMembersQueryParams>,
) -> Result<(StatusCode, Json<DataResponse<Vec<MemberResponse>>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let workspace_id = WorkspaceId::new(query_params.workspace_id);

    authorize(
        &state.member_store,
        &workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    let members = state
        .member_store
        .read()
        .await
        .list_members(&workspace_id)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    let mut response_members = Vec::with_capacity(members.len());
    for member in members {
        let profile = state
            .user_directory
            .get_profile(&member.user_id)
            .await
            .map_err(ApiError::UnexpectedError)?;

        response_members.push(MemberResponse {
            id: member.id.as_ref().to_string(),
            workspace_id: member.workspace_id.as_ref().to_string(),
            user_id: member.user_id.as_ref().to_string(),
            role: member.role.to_string(),
            name: profile.display_name().to_owned(),
            email: profile.email,
            created_at: member.created_at,
        });
    }

    let response = Json(DataResponse::new(response_members));

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub workspace_id: String,
    pub user_id: String,
    pub role: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
