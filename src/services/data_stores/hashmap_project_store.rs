use std::collections::HashMap;

use crate::domain::{
    Project, ProjectId, ProjectStore, ProjectStoreError, WorkspaceId,
};

#[derive(Default)]
pub struct HashmapProjectStore {
    projects: HashMap<ProjectId, Project>,
}

#[async_trait::async_trait]
impl ProjectStore for HashmapProjectStore {
    async fn add_project(
        &mut self,
        project: Project,
    ) -> Result<(), ProjectStoreError> {
        self.projects.insert(project.id.clone(), project);
        Ok(())
    }

    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        match self.projects.get(project_id) {
            Some(project) => Ok(project.clone()),
            None => Err(ProjectStoreError::ProjectNotFound),
        }
    }

    async fn list_projects(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<Project>, ProjectStoreError> {
        let mut projects: Vec<Project> = self
            .projects
            .values()
            .filter(|project| &project.workspace_id == workspace_id)
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn update_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError> {
        match self.projects.get_mut(&project.id) {
            Some(existing) => {
                *existing = project.clone();
                Ok(())
            }
            None => Err(ProjectStoreError::ProjectNotFound),
        }
    }

    async fn delete_project(
        &mut self,
        project_id: &ProjectId,
    ) -> Result<(), ProjectStoreError> {
        match self.projects.remove(project_id) {
            Some(_) => Ok(()),
            None => Err(ProjectStoreError::ProjectNotFound),
        }
    }

    async fn delete_projects_in_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), ProjectStoreError> {
        self.projects
            .retain(|_, project| &project.workspace_id != workspace_id);
        Ok(())
    }
}
