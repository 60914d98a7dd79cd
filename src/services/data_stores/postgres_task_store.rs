use color_eyre::eyre::Report;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::domain::{
    MemberId, Position, ProjectId, Task, TaskFilter, TaskId, TaskName,
    TaskStatus, TaskStore, TaskStoreError, WorkspaceId,
};

pub struct PostgresTaskStore {
    pool: PgPool,
}

impl PostgresTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unexpected<E: Into<Report>>(e: E) -> TaskStoreError {
    TaskStoreError::UnexpectedError(e.into())
}

fn task_from_row(row: &PgRow) -> Result<Task, TaskStoreError> {
    let name: String = row.try_get("task_name").map_err(unexpected)?;
    let status: String = row.try_get("status").map_err(unexpected)?;

    Ok(Task {
        id: TaskId::new(
            row.try_get::<Uuid, _>("task_id").map_err(unexpected)?,
        ),
        workspace_id: WorkspaceId::new(
            row.try_get::<Uuid, _>("workspace_id").map_err(unexpected)?,
        ),
        project_id: ProjectId::new(
            row.try_get::<Uuid, _>("project_id").map_err(unexpected)?,
        ),
        name: TaskName::parse(&name).map_err(unexpected)?,
        status: status.parse::<TaskStatus>().map_err(unexpected)?,
        assignee_id: MemberId::new(
            row.try_get::<Uuid, _>("assignee_id").map_err(unexpected)?,
        ),
        description: row.try_get("description").map_err(unexpected)?,
        due_date: row.try_get("due_date").map_err(unexpected)?,
        position: Position::new(
            row.try_get::<i64, _>("position").map_err(unexpected)?,
        ),
        created_at: row.try_get("created_at").map_err(unexpected)?,
    })
}

const TASK_COLUMNS: &str = "task_id, workspace_id, project_id, task_name, \
                            status, assignee_id, description, due_date, \
                            position, created_at";

fn push_filter<'a>(
    builder: &mut QueryBuilder<'a, Postgres>,
    filter: &'a TaskFilter,
) {
    builder.push(" WHERE workspace_id = ");
    builder.push_bind(*filter.workspace_id.as_ref());
    if let Some(project_id) = &filter.project_id {
        builder.push(" AND project_id = ");
        builder.push_bind(*project_id.as_ref());
    }
    if let Some(assignee_id) = &filter.assignee_id {
        builder.push(" AND assignee_id = ");
        builder.push_bind(*assignee_id.as_ref());
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ");
        builder.push_bind(status.as_str());
    }
    if let Some(status_not) = filter.status_not {
        builder.push(" AND status <> ");
        builder.push_bind(status_not.as_str());
    }
    if let Some(due_date) = filter.due_date {
        builder.push(" AND due_date = ");
        builder.push_bind(due_date);
    }
    if let Some(due_before) = filter.due_before {
        builder.push(" AND due_date < ");
        builder.push_bind(due_before);
    }
    if let Some(created_from) = filter.created_from {
        builder.push(" AND created_at >= ");
        builder.push_bind(created_from);
    }
    if let Some(created_until) = filter.created_until {
        builder.push(" AND created_at <= ");
        builder.push_bind(created_until);
    }
    if let Some(search) = &filter.search {
        builder.push(" AND task_name ILIKE ");
        builder.push_bind(format!("%{search}%"));
    }
}

#[async_trait::async_trait]
impl TaskStore for PostgresTaskStore {
    #[tracing::instrument(name = "Adding task to PostgreSQL", skip_all)]
    async fn add_task(&mut self, task: Task) -> Result<(), TaskStoreError> {
        sqlx::query(
            r#"
            INSERT INTO tasks
                (task_id, workspace_id, project_id, task_name, status,
                 assignee_id, description, due_date, position, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(*task.id.as_ref())
        .bind(*task.workspace_id.as_ref())
        .bind(*task.project_id.as_ref())
        .bind(task.name.as_ref())
        .bind(task.status.as_str())
        .bind(*task.assignee_id.as_ref())
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.position.value_of())
        .bind(task.created_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting task from PostgreSQL", skip_all)]
    async fn get_task(
        &self,
        task_id: &TaskId,
    ) -> Result<Task, TaskStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE task_id = $1"
        ))
        .bind(*task_id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(TaskStoreError::TaskNotFound)?;

        task_from_row(&row)
    }

    #[tracing::instrument(name = "Getting tasks from PostgreSQL", skip_all)]
    async fn get_tasks(
        &self,
        task_ids: &[TaskId],
    ) -> Result<Vec<Task>, TaskStoreError> {
        let ids: Vec<Uuid> = task_ids.iter().map(|id| *id.as_ref()).collect();

        let rows = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE task_id = ANY($1)"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.iter().map(task_from_row).collect()
    }

    #[tracing::instrument(name = "Listing tasks from PostgreSQL", skip_all)]
    async fn list_tasks(
        &self,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, TaskStoreError> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {TASK_COLUMNS} FROM tasks"
        ));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        rows.iter().map(task_from_row).collect()
    }

    #[tracing::instrument(name = "Counting tasks in PostgreSQL", skip_all)]
    async fn count_tasks(
        &self,
        filter: &TaskFilter,
    ) -> Result<i64, TaskStoreError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM tasks");
        push_filter(&mut builder, filter);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)
    }

    #[tracing::instrument(
        name = "Getting highest task position from PostgreSQL",
        skip_all
    )]
    async fn highest_position(
        &self,
        workspace_id: &WorkspaceId,
        status: TaskStatus,
    ) -> Result<Option<Position>, TaskStoreError> {
        let highest = sqlx::query_scalar::<_, Option<i64>>(
            r#"
            SELECT MAX(position) FROM tasks
            WHERE workspace_id = $1 AND status = $2
            "#,
        )
        .bind(*workspace_id.as_ref())
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(highest.map(Position::new))
    }

    #[tracing::instrument(name = "Updating task in PostgreSQL", skip_all)]
    async fn update_task(
        &mut self,
        task: &Task,
    ) -> Result<(), TaskStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET project_id = $2, task_name = $3, status = $4,
                assignee_id = $5, description = $6, due_date = $7,
                position = $8
            WHERE task_id = $1
            "#,
        )
        .bind(*task.id.as_ref())
        .bind(*task.project_id.as_ref())
        .bind(task.name.as_ref())
        .bind(task.status.as_str())
        .bind(*task.assignee_id.as_ref())
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.position.value_of())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(TaskStoreError::TaskNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting task from PostgreSQL", skip_all)]
    async fn delete_task(
        &mut self,
        task_id: &TaskId,
    ) -> Result<(), TaskStoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE task_id = $1")
            .bind(*task_id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(TaskStoreError::TaskNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(
        name = "Deleting workspace tasks from PostgreSQL",
        skip_all
    )]
    async fn delete_tasks_in_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), TaskStoreError> {
        sqlx::query("DELETE FROM tasks WHERE workspace_id = $1")
            .bind(*workspace_id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Deleting project tasks from PostgreSQL",
        skip_all
    )]
    async fn delete_tasks_in_project(
        &mut self,
        project_id: &ProjectId,
    ) -> Result<(), TaskStoreError> {
        sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(*project_id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}
