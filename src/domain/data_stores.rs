use chrono::{DateTime, Utc};
use color_eyre::eyre::Report;
use thiserror::Error;

use super::{
    Member, MemberId, Position, Project, ProjectId, Task, TaskId, TaskStatus,
    UserId, Workspace, WorkspaceId,
};

#[async_trait::async_trait]
pub trait WorkspaceStore {
    async fn add_workspace(
        &mut self,
        workspace: Workspace,
    ) -> Result<(), WorkspaceStoreError>;
    async fn get_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Workspace, WorkspaceStoreError>;
    /// Workspaces for the given ids, newest first.
    async fn list_workspaces(
        &self,
        workspace_ids: &[WorkspaceId],
    ) -> Result<Vec<Workspace>, WorkspaceStoreError>;
    async fn update_workspace(
        &mut self,
        workspace: &Workspace,
    ) -> Result<(), WorkspaceStoreError>;
    async fn delete_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), WorkspaceStoreError>;
}

#[derive(Debug, Error)]
pub enum WorkspaceStoreError {
    #[error("Workspace not found")]
    WorkspaceNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for WorkspaceStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::WorkspaceNotFound, Self::WorkspaceNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait MemberStore {
    /// Fails with `MembershipExists` when the (workspace, user) pair
    /// already has a record.
    async fn add_member(
        &mut self,
        member: Member,
    ) -> Result<(), MemberStoreError>;
    async fn get_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Member, MemberStoreError>;
    /// The single membership linking a user to a workspace, if any.
    /// Absence is not an error.
    async fn find_membership(
        &self,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
    ) -> Result<Option<Member>, MemberStoreError>;
    async fn list_members(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<Member>, MemberStoreError>;
    async fn list_memberships_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Member>, MemberStoreError>;
    async fn count_members(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<i64, MemberStoreError>;
    async fn update_member(
        &mut self,
        member: &Member,
    ) -> Result<(), MemberStoreError>;
    async fn delete_member(
        &mut self,
        member_id: &MemberId,
    ) -> Result<(), MemberStoreError>;
    async fn delete_members_in_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), MemberStoreError>;
}

#[derive(Debug, Error)]
pub enum MemberStoreError {
    #[error("Member not found")]
    MemberNotFound,
    #[error("Membership already exists")]
    MembershipExists,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for MemberStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::MemberNotFound, Self::MemberNotFound)
                | (Self::MembershipExists, Self::MembershipExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait ProjectStore {
    async fn add_project(
        &mut self,
        project: Project,
    ) -> Result<(), ProjectStoreError>;
    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError>;
    /// Projects in a workspace, newest first.
    async fn list_projects(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<Project>, ProjectStoreError>;
    async fn update_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError>;
    async fn delete_project(
        &mut self,
        project_id: &ProjectId,
    ) -> Result<(), ProjectStoreError>;
    async fn delete_projects_in_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), ProjectStoreError>;
}

#[derive(Debug, Error)]
pub enum ProjectStoreError {
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for ProjectStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ProjectNotFound, Self::ProjectNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Conjunctive task query. `workspace_id` is always required; every other
/// field narrows the result when set.
#[derive(Debug, Clone)]
pub struct TaskFilter {
    pub workspace_id: WorkspaceId,
    pub project_id: Option<ProjectId>,
    pub assignee_id: Option<MemberId>,
    pub status: Option<TaskStatus>,
    pub status_not: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub due_before: Option<DateTime<Utc>>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_until: Option<DateTime<Utc>>,
    pub search: Option<String>,
}

impl TaskFilter {
    pub fn for_workspace(workspace_id: WorkspaceId) -> Self {
        Self {
            workspace_id,
            project_id: None,
            assignee_id: None,
            status: None,
            status_not: None,
            due_date: None,
            due_before: None,
            created_from: None,
            created_until: None,
            search: None,
        }
    }
}

#[async_trait::async_trait]
pub trait TaskStore {
    async fn add_task(&mut self, task: Task) -> Result<(), TaskStoreError>;
    async fn get_task(
        &self,
        task_id: &TaskId,
    ) -> Result<Task, TaskStoreError>;
    /// Tasks for the given ids; missing ids are silently absent from the
    /// result.
    async fn get_tasks(
        &self,
        task_ids: &[TaskId],
    ) -> Result<Vec<Task>, TaskStoreError>;
    /// Matching tasks, newest first.
    async fn list_tasks(
        &self,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, TaskStoreError>;
    async fn count_tasks(
        &self,
        filter: &TaskFilter,
    ) -> Result<i64, TaskStoreError>;
    /// Highest rank currently assigned in a (workspace, status) column.
    async fn highest_position(
        &self,
        workspace_id: &WorkspaceId,
        status: TaskStatus,
    ) -> Result<Option<Position>, TaskStoreError>;
    async fn update_task(
        &mut self,
        task: &Task,
    ) -> Result<(), TaskStoreError>;
    async fn delete_task(
        &mut self,
        task_id: &TaskId,
    ) -> Result<(), TaskStoreError>;
    async fn delete_tasks_in_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), TaskStoreError>;
    async fn delete_tasks_in_project(
        &mut self,
        project_id: &ProjectId,
    ) -> Result<(), TaskStoreError>;
}

#[derive(Debug, Error)]
pub enum TaskStoreError {
    #[error("Task not found")]
    TaskNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for TaskStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::TaskNotFound, Self::TaskNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
