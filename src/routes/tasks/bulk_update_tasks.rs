use std::collections::{HashMap, HashSet};

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{
        ApiError, ConflictError, Position, TaskId, TaskStatus,
        TaskStoreError, WorkspaceId,
    },
    utils::{
        auth::get_session_user,
        membership::{authorize, AccessLevel},
    },
    AppState, DataResponse,
};

use super::TaskResponse;

/// Applies a drag-and-drop reorder as one batch. Every referenced task
/// must exist and the whole batch must target a single workspace, checked
/// before anything is written; the membership gate then runs once for
/// that workspace. Writes are applied one at a time with no rollback, so
/// a mid-batch store failure leaves earlier updates in place.
#[tracing::instrument(name = "Bulk update tasks route handler", skip_all)]
pub async fn bulk_update_tasks(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<BulkUpdateTasksRequest>,
) -> Result<(StatusCode, Json<DataResponse<Vec<TaskResponse>>>), ApiError> {
    let user_id = get_session_user(&jar)?;

    let mut updates = Vec::with_capacity(request.tasks.len());
    for entry in &request.tasks {
        let task_id = TaskId::parse(&entry.id)?;
        let status: TaskStatus = entry.status.parse()?;
        let position = Position::parse(entry.position)?;
        updates.push((task_id, status, position));
    }

    let task_ids: Vec<TaskId> =
        updates.iter().map(|(id, _, _)| id.clone()).collect();

    let tasks = state
        .task_store
        .read()
        .await
        .get_tasks(&task_ids)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    let mut tasks_by_id: HashMap<TaskId, _> = tasks
        .into_iter()
        .map(|task| (task.id.clone(), task))
        .collect();

    if let Some(missing) =
        task_ids.iter().find(|id| !tasks_by_id.contains_key(id))
    {
        return Err(ApiError::NotFound(*missing.as_ref()));
    }

    let workspace_ids: HashSet<WorkspaceId> = tasks_by_id
        .values()
        .map(|task| task.workspace_id.clone())
        .collect();
    if workspace_ids.len() != 1 {
        return Err(ApiError::Conflict(ConflictError::MixedWorkspaces));
    }
    let workspace_id = workspace_ids
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::UnexpectedError(eyre!("empty batch")))?;

    authorize(
        &state.member_store,
        &workspace_id,
        &user_id,
        AccessLevel::Member,
    )
    .await?;

    let mut updated = Vec::with_capacity(updates.len());
    for (task_id, status, position) in updates {
        let mut task = tasks_by_id
            .get(&task_id)
            .cloned()
            .ok_or(ApiError::NotFound(*task_id.as_ref()))?;
        task.status = status;
        task.position = position;

        state
            .task_store
            .write()
            .await
            .update_task(&task)
            .await
            .map_err(|e| match e {
                TaskStoreError::TaskNotFound => {
                    ApiError::NotFound(*task_id.as_ref())
                }
                e => ApiError::UnexpectedError(eyre!(e)),
            })?;

        tasks_by_id.insert(task_id, task.clone());
        updated.push(TaskResponse::from(task));
    }

    Ok((StatusCode::OK, Json(DataResponse::new(updated))))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct BulkUpdateTasksRequest {
    pub tasks: Vec<BulkTaskUpdate>,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct BulkTaskUpdate {
    pub id: String,
    pub status: String,
    pub position: i64,
}
