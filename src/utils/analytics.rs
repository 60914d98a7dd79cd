use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use color_eyre::eyre::{eyre, Result};
use serde::{Deserialize, Serialize};

use crate::app_state::TaskStoreType;
use crate::domain::{
    ApiError, MemberId, ProjectId, TaskFilter, TaskStatus, TaskStoreError,
    WorkspaceId,
};

/// Calendar month expressed as an inclusive [start, end] timestamp pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

fn month_start(year: i32, month: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| eyre!("invalid month start: {year}-{month:02}"))
}

fn month_window(year: i32, month: u32) -> Result<MonthWindow> {
    let start = month_start(year, month)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = month_start(next_year, next_month)? - Duration::microseconds(1);
    Ok(MonthWindow { start, end })
}

pub fn month_of(now: DateTime<Utc>) -> Result<MonthWindow> {
    month_window(now.year(), now.month())
}

pub fn month_before(now: DateTime<Utc>) -> Result<MonthWindow> {
    let (year, month) = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };
    month_window(year, month)
}

/// Current-month metrics plus the signed delta against the immediately
/// preceding calendar month. Only two months are ever compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAnalytics {
    pub task_count: i64,
    pub task_difference: i64,
    pub assigned_task_count: i64,
    pub assigned_task_difference: i64,
    pub completed_task_count: i64,
    pub completed_task_difference: i64,
    pub incomplete_task_count: i64,
    pub incomplete_task_difference: i64,
    pub overdue_task_count: i64,
    pub overdue_task_difference: i64,
}

#[derive(Debug, Clone)]
pub struct AnalyticsScope {
    pub workspace_id: WorkspaceId,
    pub project_id: Option<ProjectId>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct MonthCounts {
    total: i64,
    assigned: i64,
    completed: i64,
    incomplete: i64,
    overdue: i64,
}

#[tracing::instrument(name = "Computing task analytics", skip_all)]
pub async fn compute_task_analytics(
    task_store: &TaskStoreType,
    scope: &AnalyticsScope,
    member_id: &MemberId,
    now: DateTime<Utc>,
) -> Result<TaskAnalytics, ApiError> {
    let this_month = month_of(now).map_err(ApiError::UnexpectedError)?;
    let last_month = month_before(now).map_err(ApiError::UnexpectedError)?;

    let current = count_month(task_store, scope, member_id, now, &this_month)
        .await?;
    let previous = count_month(task_store, scope, member_id, now, &last_month)
        .await?;

    Ok(TaskAnalytics {
        task_count: current.total,
        task_difference: current.total - previous.total,
        assigned_task_count: current.assigned,
        assigned_task_difference: current.assigned - previous.assigned,
        completed_task_count: current.completed,
        completed_task_difference: current.completed - previous.completed,
        incomplete_task_count: current.incomplete,
        incomplete_task_difference: current.incomplete - previous.incomplete,
        overdue_task_count: current.overdue,
        overdue_task_difference: current.overdue - previous.overdue,
    })
}

async fn count_month(
    task_store: &TaskStoreType,
    scope: &AnalyticsScope,
    member_id: &MemberId,
    now: DateTime<Utc>,
    window: &MonthWindow,
) -> Result<MonthCounts, ApiError> {
    let base = {
        let mut filter = TaskFilter::for_workspace(scope.workspace_id.clone());
        filter.project_id = scope.project_id.clone();
        filter.created_from = Some(window.start);
        filter.created_until = Some(window.end);
        filter
    };

    let store = task_store.read().await;

    let total = store.count_tasks(&base).await.map_err(unexpected)?;

    let mut assigned_filter = base.clone();
    assigned_filter.assignee_id = Some(member_id.clone());
    let assigned = store
        .count_tasks(&assigned_filter)
        .await
        .map_err(unexpected)?;

    let mut completed_filter = base.clone();
    completed_filter.status = Some(TaskStatus::Closed);
    let completed = store
        .count_tasks(&completed_filter)
        .await
        .map_err(unexpected)?;

    let mut incomplete_filter = base.clone();
    incomplete_filter.status_not = Some(TaskStatus::Closed);
    let incomplete = store
        .count_tasks(&incomplete_filter)
        .await
        .map_err(unexpected)?;

    // Overdue: due strictly before "now" and not yet closed.
    let mut overdue_filter = base;
    overdue_filter.status_not = Some(TaskStatus::Closed);
    overdue_filter.due_before = Some(now);
    let overdue = store
        .count_tasks(&overdue_filter)
        .await
        .map_err(unexpected)?;

    Ok(MonthCounts {
        total,
        assigned,
        completed,
        incomplete,
        overdue,
    })
}

fn unexpected(e: TaskStoreError) -> ApiError {
    ApiError::UnexpectedError(eyre!(e))
}
