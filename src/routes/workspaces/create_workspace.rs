use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{ApiError, Member, MemberRole, Workspace, WorkspaceName},
    utils::auth::get_session_user,
    AppState, DataResponse,
};

use super::WorkspaceResponse;

#[tracing::instrument(name = "Create workspace route handler", skip_all)]
pub async fn create_workspace(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<CreateWorkspaceRequest>,
) -> Result<(StatusCode, Json<DataResponse<WorkspaceResponse>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let name = WorkspaceName::parse(&request.name)?;

    let workspace = Workspace::new(name, user_id.clone(), request.image_url);
    let membership =
        Member::new(workspace.id.clone(), user_id, MemberRole::Admin);

    state
        .workspace_store
        .write()
        .await
        .add_workspace(workspace.clone())
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    // The creator joins their own workspace as its first Admin.
    state
        .member_store
        .write()
        .await
        .add_member(membership)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    let response = Json(DataResponse::new(WorkspaceResponse::from(workspace)));

    Ok((StatusCode::CREATED, response))
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceRequest {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}
