use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{ApiError, Project, ProjectName, WorkspaceId},
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

use super::ProjectResponse;

#[tracing::instrument(name = "Create project route handler", skip_all)]
pub async fn create_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<DataResponse<ProjectResponse>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let workspace_id = WorkspaceId::parse(&request.workspace_id)?;
    let name = ProjectName::parse(&request.name)?;

    authorize(
        &state.member_store,
        &workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    let project = Project::new(workspace_id, name, request.image_url);

    state
        .project_store
        .write()
        .await
        .add_project(project.clone())
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    let response = Json(DataResponse::new(ProjectResponse::from(project)));

    Ok((StatusCode::CREATED, response))
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub workspace_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
}
