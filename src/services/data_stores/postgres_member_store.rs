use color_eyre::eyre::Report;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::{
    Member, MemberId, MemberRole, MemberStore, MemberStoreError, UserId,
    WorkspaceId,
};

pub struct PostgresMemberStore {
    pool: PgPool,
}

impl PostgresMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unexpected<E: Into<Report>>(e: E) -> MemberStoreError {
    MemberStoreError::UnexpectedError(e.into())
}

fn member_from_row(row: &PgRow) -> Result<Member, MemberStoreError> {
    let role: String = row.try_get("member_role").map_err(unexpected)?;

    Ok(Member {
        id: MemberId::new(
            row.try_get::<Uuid, _>("member_id").map_err(unexpected)?,
        ),
        workspace_id: WorkspaceId::new(
            row.try_get::<Uuid, _>("workspace_id").map_err(unexpected)?,
        ),
        user_id: UserId::new(
            row.try_get::<Uuid, _>("user_id").map_err(unexpected)?,
        ),
        role: role.parse::<MemberRole>().map_err(unexpected)?,
        created_at: row.try_get("created_at").map_err(unexpected)?,
    })
}

const MEMBER_COLUMNS: &str =
    "member_id, workspace_id, user_id, member_role, created_at";

#[async_trait::async_trait]
impl MemberStore for PostgresMemberStore {
    #[tracing::instrument(name = "Adding member to PostgreSQL", skip_all)]
    async fn add_member(
        &mut self,
        member: Member,
    ) -> Result<(), MemberStoreError> {
        sqlx::query(
            r#"
            INSERT INTO members
                (member_id, workspace_id, user_id, member_role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(*member.id.as_ref())
        .bind(*member.workspace_id.as_ref())
        .bind(*member.user_id.as_ref())
        .bind(member.role.as_str())
        .bind(member.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                MemberStoreError::MembershipExists
            }
            e => unexpected(e),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting member from PostgreSQL", skip_all)]
    async fn get_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Member, MemberStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE member_id = $1"
        ))
        .bind(*member_id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(MemberStoreError::MemberNotFound)?;

        member_from_row(&row)
    }

    #[tracing::instrument(
        name = "Finding membership in PostgreSQL",
        skip_all
    )]
    async fn find_membership(
        &self,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
    ) -> Result<Option<Member>, MemberStoreError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {MEMBER_COLUMNS} FROM members
            WHERE workspace_id = $1 AND user_id = $2
            "#
        ))
        .bind(*workspace_id.as_ref())
        .bind(*user_id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.as_ref().map(member_from_row).transpose()
    }

    #[tracing::instrument(name = "Listing members from PostgreSQL", skip_all)]
    async fn list_members(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<Member>, MemberStoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {MEMBER_COLUMNS} FROM members
            WHERE workspace_id = $1
            ORDER BY created_at ASC
            "#
        ))
        .bind(*workspace_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.iter().map(member_from_row).collect()
    }

    #[tracing::instrument(
        name = "Listing memberships for user from PostgreSQL",
        skip_all
    )]
    async fn list_memberships_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Member>, MemberStoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {MEMBER_COLUMNS} FROM members
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#
        ))
        .bind(*user_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.iter().map(member_from_row).collect()
    }

    #[tracing::instrument(
        name = "Counting members in PostgreSQL",
        skip_all
    )]
    async fn count_members(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<i64, MemberStoreError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM members WHERE workspace_id = $1",
        )
        .bind(*workspace_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)
    }

    #[tracing::instrument(name = "Updating member in PostgreSQL", skip_all)]
    async fn update_member(
        &mut self,
        member: &Member,
    ) -> Result<(), MemberStoreError> {
        let result = sqlx::query(
            "UPDATE members SET member_role = $2 WHERE member_id = $1",
        )
        .bind(*member.id.as_ref())
        .bind(member.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(MemberStoreError::MemberNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(
        name = "Deleting member from PostgreSQL",
        skip_all
    )]
    async fn delete_member(
        &mut self,
        member_id: &MemberId,
    ) -> Result<(), MemberStoreError> {
        let result = sqlx::query("DELETE FROM members WHERE member_id = $1")
            .bind(*member_id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(MemberStoreError::MemberNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(
        name = "Deleting workspace members from PostgreSQL",
        skip_all
    )]
    async fn delete_members_in_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), MemberStoreError> {
        sqlx::query("DELETE FROM members WHERE workspace_id = $1")
            .bind(*workspace_id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}
