use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use crate::{
    domain::{ApiError, WorkspaceId},
    utils::auth::get_session_user,
    AppState, DataResponse,
};

use super::WorkspaceResponse;

#[tracing::instrument(name = "List workspaces route handler", skip_all)]
pub async fn list_workspaces(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, Json<DataResponse<Vec<WorkspaceResponse>>>), ApiError>
{
    let user_id = get_session_user(&jar)?;

    let memberships = state
        .member_store
        .read()
        .await
        .list_memberships_for_user(&user_id)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    let workspace_ids: Vec<WorkspaceId> = memberships
        .into_iter()
        .map(|member| member.workspace_id)
        .collect();

    let workspaces = state
        .workspace_store
        .read()
        .await
        .list_workspaces(&workspace_ids)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    let response = Json(DataResponse::new(
        workspaces
            .into_iter()
            .map(WorkspaceResponse::from)
            .collect(),
    ));

    Ok((StatusCode::OK, response))
}
