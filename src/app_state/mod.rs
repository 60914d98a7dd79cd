use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{
    MemberStore, ProjectStore, TaskStore, UserDirectory, WorkspaceStore,
};

pub type WorkspaceStoreType = Arc<RwLock<dyn WorkspaceStore + Send + Sync>>;
pub type MemberStoreType = Arc<RwLock<dyn MemberStore + Send + Sync>>;
pub type ProjectStoreType = Arc<RwLock<dyn ProjectStore + Send + Sync>>;
pub type TaskStoreType = Arc<RwLock<dyn TaskStore + Send + Sync>>;
pub type UserDirectoryType = Arc<dyn UserDirectory + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub workspace_store: WorkspaceStoreType,
    pub member_store: MemberStoreType,
    pub project_store: ProjectStoreType,
    pub task_store: TaskStoreType,
    pub user_directory: UserDirectoryType,
}

impl AppState {
    pub fn new(
        workspace_store: WorkspaceStoreType,
        member_store: MemberStoreType,
        project_store: ProjectStoreType,
        task_store: TaskStoreType,
        user_directory: UserDirectoryType,
    ) -> Self {
        Self {
            workspace_store,
            member_store,
            project_store,
            task_store,
            user_directory,
        }
    }
}
