use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{ApiError, WorkspaceId, WorkspaceName, WorkspaceStoreError},
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

use super::WorkspaceResponse;

#[tracing::instrument(name = "Update workspace route handler", skip_all)]
pub async fn update_workspace(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(workspace_id): Path<String>,
    Json(request): Json<UpdateWorkspaceRequest>,
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

    if let Some(name) = &request.name {
        workspace.name = WorkspaceName::parse(name)?;
    }
    if let Some(image_url) = request.image_url {
        // An empty string clears the image.
        workspace.image_url =
            (!image_url.is_empty()).then_some(image_url);
    }

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

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkspaceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}
