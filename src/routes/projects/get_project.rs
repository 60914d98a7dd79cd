use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use crate::{
    domain::{ApiError, ProjectId, ProjectStoreError},
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

use super::ProjectResponse;

#[tracing::instrument(name = "Get project route handler", skip_all)]
pub async fn get_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(project_id): Path<String>,
) -> Result<(StatusCode, Json<DataResponse<ProjectResponse>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let project_id = ProjectId::parse(&project_id)?;

    let project = state
        .project_store
        .read()
        .await
        .get_project(&project_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::ProjectNotFound => {
                ApiError::NotFound(*project_id.as_ref())
            }
            e => ApiError::UnexpectedError(eyre!(e)),
        })?;

    authorize(
        &state.member_store,
        &project.workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    let response = Json(DataResponse::new(ProjectResponse::from(project)));

    Ok((StatusCode::OK, response))
}
