use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{ApiError, WorkspaceId},
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

use super::ProjectResponse;

#[derive(Deserialize)]
pub struct ListProjectsQueryParams {
    #[serde(rename = "workspaceId")]
    workspace_id: uuid::Uuid,
}

#[tracing::instrument(name = "List projects route handler", skip_all)]
pub async fn list_projects(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<ListProjectsQueryParams>,
) -> Result<(StatusCode, Json<DataResponse<Vec<ProjectResponse>>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let workspace_id = WorkspaceId::new(query_params.workspace_id);

    authorize(
        &state.member_store,
        &workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    let projects = state
        .project_store
        .read()
        .await
        .list_projects(&workspace_id)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    let response = Json(DataResponse::new(
        projects.into_iter().map(ProjectResponse::from).collect(),
    ));

    Ok((StatusCode::OK, response))
}
