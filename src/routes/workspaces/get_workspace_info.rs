use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ApiError, WorkspaceId, WorkspaceStoreError},
    AppState, DataResponse,
};

/// Public lookup backing the join screen. No session is required and the
/// response never carries the invite code.
#[tracing::instrument(name = "Get workspace info route handler", skip_all)]
pub async fn get_workspace_info(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
) -> Result<(StatusCode, Json<DataResponse<WorkspaceInfoResponse>>), ApiError>
{
    let workspace_id = WorkspaceId::parse(&workspace_id)?;

    let workspace = state
        .workspace_store
        .read()
        .await
        .get_workspace(&workspace_id)
        .await
        .map_err(|e| match e {
            WorkspaceStoreError::WorkspaceNotFound => {
                ApiError::NotFound(*workspace_id.as_ref())
            }
            e => ApiError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(DataResponse::new(WorkspaceInfoResponse {
        id: workspace.id.as_ref().to_string(),
        name: workspace.name.as_ref().to_owned(),
        image_url: workspace.image_url,
    }));

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceInfoResponse {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}
