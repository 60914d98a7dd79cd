use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{
        ApiError, MemberId, ProjectId, TaskFilter, TaskStatus, WorkspaceId,
    },
    routes::projects::ProjectResponse,
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

use super::{
    assignee_summary, AssigneeResponse, TaskDetailResponse, TaskResponse,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQueryParams {
    workspace_id: uuid::Uuid,
    #[serde(default)]
    project_id: Option<uuid::Uuid>,
    #[serde(default)]
    assignee_id: Option<uuid::Uuid>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    search: Option<String>,
}

/// Lists a workspace's tasks, newest first, optionally narrowed by the
/// query filters. Each task is returned with its project and assignee.
#[tracing::instrument(name = "List tasks route handler", skip_all)]
pub async fn list_tasks(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<ListTasksQueryParams>,
) -> Result<(StatusCode, Json<DataResponse<Vec<TaskDetailResponse>>>), ApiError>
{
    let user_id = get_session_user(&jar)?;
    let workspace_id = WorkspaceId::new(query_params.workspace_id);

    authorize(
        &state.member_store,
        &workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    let mut filter = TaskFilter::for_workspace(workspace_id);
    filter.project_id = query_params.project_id.map(ProjectId::new);
    filter.assignee_id = query_params.assignee_id.map(MemberId::new);
    if let Some(status) = &query_params.status {
        filter.status = Some(status.parse::<TaskStatus>()?);
    }
    filter.due_date = query_params.due_date;
    filter.search = query_params.search.clone();

    let tasks = state
        .task_store
        .read()
        .await
        .list_tasks(&filter)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    // Boards repeat the same few projects and assignees, so lookups are
    // cached for the duration of the request.
    let mut projects: HashMap<ProjectId, ProjectResponse> = HashMap::new();
    let mut assignees: HashMap<MemberId, Option<AssigneeResponse>> =
        HashMap::new();

    let mut details = Vec::with_capacity(tasks.len());
    for task in tasks {
        let project = match projects.get(&task.project_id) {
            Some(project) => project.clone(),
            None => {
                let project = state
                    .project_store
                    .read()
                    .await
                    .get_project(&task.project_id)
                    .await
                    .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;
                let project = ProjectResponse::from(project);
                projects.insert(task.project_id.clone(), project.clone());
                project
            }
        };

        let assignee = match assignees.get(&task.assignee_id) {
            Some(assignee) => assignee.clone(),
            None => {
                let assignee =
                    assignee_summary(&state, &task.assignee_id).await?;
                assignees.insert(task.assignee_id.clone(), assignee.clone());
                assignee
            }
        };

        details.push(TaskDetailResponse {
            task: TaskResponse::from(task),
            project,
            assignee,
        });
    }

    Ok((StatusCode::OK, Json(DataResponse::new(details))))
}
