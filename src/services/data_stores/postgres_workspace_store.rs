use color_eyre::eyre::Report;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::{
    InviteCode, UserId, Workspace, WorkspaceId, WorkspaceName,
    WorkspaceStore, WorkspaceStoreError,
};

pub struct PostgresWorkspaceStore {
    pool: PgPool,
}

impl PostgresWorkspaceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unexpected<E: Into<Report>>(e: E) -> WorkspaceStoreError {
    WorkspaceStoreError::UnexpectedError(e.into())
}

fn workspace_from_row(row: &PgRow) -> Result<Workspace, WorkspaceStoreError> {
    let name: String = row.try_get("workspace_name").map_err(unexpected)?;
    let invite_code: String =
        row.try_get("invite_code").map_err(unexpected)?;

    Ok(Workspace {
        id: WorkspaceId::new(
            row.try_get::<Uuid, _>("workspace_id").map_err(unexpected)?,
        ),
        name: WorkspaceName::parse(&name).map_err(unexpected)?,
        owner_user_id: UserId::new(
            row.try_get::<Uuid, _>("owner_user_id").map_err(unexpected)?,
        ),
        image_url: row.try_get("image_url").map_err(unexpected)?,
        invite_code: InviteCode::parse(&invite_code).map_err(unexpected)?,
        created_at: row.try_get("created_at").map_err(unexpected)?,
    })
}

#[async_trait::async_trait]
impl WorkspaceStore for PostgresWorkspaceStore {
    #[tracing::instrument(name = "Adding workspace to PostgreSQL", skip_all)]
    async fn add_workspace(
        &mut self,
        workspace: Workspace,
    ) -> Result<(), WorkspaceStoreError> {
        sqlx::query(
            r#"
            INSERT INTO workspaces
                (workspace_id, workspace_name, owner_user_id, image_url,
                 invite_code, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(*workspace.id.as_ref())
        .bind(workspace.name.as_ref())
        .bind(*workspace.owner_user_id.as_ref())
        .bind(&workspace.image_url)
        .bind(workspace.invite_code.as_ref())
        .bind(workspace.created_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Getting workspace from PostgreSQL",
        skip_all
    )]
    async fn get_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Workspace, WorkspaceStoreError> {
        let row = sqlx::query(
            r#"
            SELECT workspace_id, workspace_name, owner_user_id, image_url,
                   invite_code, created_at
            FROM workspaces
            WHERE workspace_id = $1
            "#,
        )
        .bind(*workspace_id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(WorkspaceStoreError::WorkspaceNotFound)?;

        workspace_from_row(&row)
    }

    #[tracing::instrument(
        name = "Listing workspaces from PostgreSQL",
        skip_all
    )]
    async fn list_workspaces(
        &self,
        workspace_ids: &[WorkspaceId],
    ) -> Result<Vec<Workspace>, WorkspaceStoreError> {
        let ids: Vec<Uuid> =
            workspace_ids.iter().map(|id| *id.as_ref()).collect();

        let rows = sqlx::query(
            r#"
            SELECT workspace_id, workspace_name, owner_user_id, image_url,
                   invite_code, created_at
            FROM workspaces
            WHERE workspace_id = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.iter().map(workspace_from_row).collect()
    }

    #[tracing::instrument(
        name = "Updating workspace in PostgreSQL",
        skip_all
    )]
    async fn update_workspace(
        &mut self,
        workspace: &Workspace,
    ) -> Result<(), WorkspaceStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE workspaces
            SET workspace_name = $2, image_url = $3, invite_code = $4
            WHERE workspace_id = $1
            "#,
        )
        .bind(*workspace.id.as_ref())
        .bind(workspace.name.as_ref())
        .bind(&workspace.image_url)
        .bind(workspace.invite_code.as_ref())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(WorkspaceStoreError::WorkspaceNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(
        name = "Deleting workspace from PostgreSQL",
        skip_all
    )]
    async fn delete_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), WorkspaceStoreError> {
        let result =
            sqlx::query("DELETE FROM workspaces WHERE workspace_id = $1")
                .bind(*workspace_id.as_ref())
                .execute(&self.pool)
                .await
                .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(WorkspaceStoreError::WorkspaceNotFound);
        }
        Ok(())
    }
}
