use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use color_eyre::eyre::eyre;

use crate::{
    domain::{ApiError, ProjectId, ProjectStoreError},
    utils::{
        analytics::{compute_task_analytics, AnalyticsScope, TaskAnalytics},
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

#[tracing::instrument(name = "Project analytics route handler", skip_all)]
pub async fn project_analytics(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(project_id): Path<String>,
) -> Result<(StatusCode, Json<DataResponse<TaskAnalytics>>), ApiError> {
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

    let member = authorize(
        &state.member_store,
        &project.workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    let scope = AnalyticsScope {
        workspace_id: project.workspace_id,
        project_id: Some(project_id),
    };

    let analytics = compute_task_analytics(
        &state.task_store,
        &scope,
        &member.id,
        Utc::now(),
    )
    .await?;

    Ok((StatusCode::OK, Json(DataResponse::new(analytics))))
}
