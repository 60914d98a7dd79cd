use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;

use crate::{
    domain::{ApiError, WorkspaceId},
    utils::{
        analytics::{compute_task_analytics, AnalyticsScope, TaskAnalytics},
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

#[tracing::instrument(name = "Workspace analytics route handler", skip_all)]
pub async fn workspace_analytics(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(workspace_id): Path<String>,
) -> Result<(StatusCode, Json<DataResponse<TaskAnalytics>>), ApiError> {
    let user_id = get_session_user(&jar)?;
    let workspace_id = WorkspaceId::parse(&workspace_id)?;

    let member = authorize(
        &state.member_store,
        &workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    let scope = AnalyticsScope {
        workspace_id,
        project_id: None,
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
