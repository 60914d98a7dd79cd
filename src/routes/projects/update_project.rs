use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{ApiError, ProjectId, ProjectName, ProjectStoreError},
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

use super::ProjectResponse;

#[tracing::instrument(name = "Update project route handler", skip_all)]
pub async fn update_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(project_id): Path<String>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<(StatusCode, Json<DataResponse<ProjectResponse>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let project_id = ProjectId::parse(&project_id)?;

    let not_found = |e| match e {
        ProjectStoreError::ProjectNotFound => {
            ApiError::NotFound(*project_id.as_ref())
        }
        e => ApiError::UnexpectedError(eyre!(e)),
    };

    let mut project = state
        .project_store
        .read()
        .await
        .get_project(&project_id)
        .await
        .map_err(not_found)?;

    authorize(
        &state.member_store,
        &project.workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    if let Some(name) = &request.name {
        project.name = ProjectName::parse(name)?;
    }
    if let Some(image_url) = request.image_url {
        // An empty string clears the image.
        project.image_url = (!image_url.is_empty()).then_some(image_url);
    }

    state
        .project_store
        .write()
        .await
        .update_project(&project)
        .await
        .map_err(not_found)?;

    let response = Json(DataResponse::new(ProjectResponse::from(project)));

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}
