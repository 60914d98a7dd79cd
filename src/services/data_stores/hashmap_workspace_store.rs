use std::collections::HashMap;

use crate::domain::{
    Workspace, WorkspaceId, WorkspaceStore, WorkspaceStoreError,
};

#[derive(Default)]
pub struct HashmapWorkspaceStore {
    workspaces: HashMap<WorkspaceId, Workspace>,
}

#[async_trait::async_trait]
impl WorkspaceStore for HashmapWorkspaceStore {
    async fn add_workspace(
        &mut self,
        workspace: Workspace,
    ) -> Result<(), WorkspaceStoreError> {
        self.workspaces.insert(workspace.id.clone(), workspace);
        Ok(())
    }

    async fn get_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Workspace, WorkspaceStoreError> {
        match self.workspaces.get(workspace_id) {
            Some(workspace) => Ok(workspace.clone()),
            None => Err(WorkspaceStoreError::WorkspaceNotFound),
        }
    }

    async fn list_workspaces(
        &self,
        workspace_ids: &[WorkspaceId],
    ) -> Result<Vec<Workspace>, WorkspaceStoreError> {
        let mut workspaces: Vec<Workspace> = self
            .workspaces
            .values()
            .filter(|workspace| workspace_ids.contains(&workspace.id))
            .cloned()
            .collect();
        workspaces.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(workspaces)
    }

    async fn update_workspace(
        &mut self,
        workspace: &Workspace,
    ) -> Result<(), WorkspaceStoreError> {
        match self.workspaces.get_mut(&workspace.id) {
            Some(existing) => {
                *existing = workspace.clone();
                Ok(())
            }
            None => Err(WorkspaceStoreError::WorkspaceNotFound),
        }
    }

    async fn delete_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), WorkspaceStoreError> {
        match self.workspaces.remove(workspace_id) {
            Some(_) => Ok(()),
            None => Err(WorkspaceStoreError::WorkspaceNotFound),
        }
    }
}
