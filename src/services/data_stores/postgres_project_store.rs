use color_eyre::eyre::Report;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::{
    Project, ProjectId, ProjectName, ProjectStore, ProjectStoreError,
    WorkspaceId,
};

pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unexpected<E: Into<Report>>(e: E) -> ProjectStoreError {
    ProjectStoreError::UnexpectedError(e.into())
}

fn project_from_row(row: &PgRow) -> Result<Project, ProjectStoreError> {
    let name: String = row.try_get("project_name").map_err(unexpected)?;

    Ok(Project {
        id: ProjectId::new(
            row.try_get::<Uuid, _>("project_id").map_err(unexpected)?,
        ),
        workspace_id: WorkspaceId::new(
            row.try_get::<Uuid, _>("workspace_id").map_err(unexpected)?,
        ),
        name: ProjectName::parse(&name).map_err(unexpected)?,
        image_url: row.try_get("image_url").map_err(unexpected)?,
        created_at: row.try_get("created_at").map_err(unexpected)?,
    })
}

#[async_trait::async_trait]
impl ProjectStore for PostgresProjectStore {
    #[tracing::instrument(name = "Adding project to PostgreSQL", skip_all)]
    async fn add_project(
        &mut self,
        project: Project,
    ) -> Result<(), ProjectStoreError> {
        sqlx::query(
            r#"
            INSERT INTO projects
                (project_id, workspace_id, project_name, image_url,
                 created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(*project.id.as_ref())
        .bind(*project.workspace_id.as_ref())
        .bind(project.name.as_ref())
        .bind(&project.image_url)
        .bind(project.created_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting project from PostgreSQL", skip_all)]
    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        let row = sqlx::query(
            r#"
            SELECT project_id, workspace_id, project_name, image_url,
                   created_at
            FROM projects
            WHERE project_id = $1
            "#,
        )
        .bind(*project_id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(ProjectStoreError::ProjectNotFound)?;

        project_from_row(&row)
    }

    #[tracing::instrument(
        name = "Listing projects from PostgreSQL",
        skip_all
    )]
    async fn list_projects(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<Project>, ProjectStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT project_id, workspace_id, project_name, image_url,
                   created_at
            FROM projects
            WHERE workspace_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(*workspace_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.iter().map(project_from_row).collect()
    }

    #[tracing::instrument(name = "Updating project in PostgreSQL", skip_all)]
    async fn update_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET project_name = $2, image_url = $3
            WHERE project_id = $1
            "#,
        )
        .bind(*project.id.as_ref())
        .bind(project.name.as_ref())
        .bind(&project.image_url)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::ProjectNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(
        name = "Deleting project from PostgreSQL",
        skip_all
    )]
    async fn delete_project(
        &mut self,
        project_id: &ProjectId,
    ) -> Result<(), ProjectStoreError> {
        let result =
            sqlx::query("DELETE FROM projects WHERE project_id = $1")
                .bind(*project_id.as_ref())
                .execute(&self.pool)
                .await
                .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::ProjectNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(
        name = "Deleting workspace projects from PostgreSQL",
        skip_all
    )]
    async fn delete_projects_in_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), ProjectStoreError> {
        sqlx::query("DELETE FROM projects WHERE workspace_id = $1")
            .bind(*workspace_id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}
