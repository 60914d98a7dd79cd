use std::collections::HashMap;

use crate::domain::{
    Position, ProjectId, Task, TaskFilter, TaskId, TaskStatus, TaskStore,
    TaskStoreError, WorkspaceId,
};

#[derive(Default)]
pub struct HashmapTaskStore {
    tasks: HashMap<TaskId, Task>,
}

fn matches(task: &Task, filter: &TaskFilter) -> bool {
    if task.workspace_id != filter.workspace_id {
        return false;
    }
    if let Some(project_id) = &filter.project_id {
        if &task.project_id != project_id {
            return false;
        }
    }
    if let Some(assignee_id) = &filter.assignee_id {
        if &task.assignee_id != assignee_id {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if task.status != status {
            return false;
        }
    }
    if let Some(status_not) = filter.status_not {
        if task.status == status_not {
            return false;
        }
    }
    if let Some(due_date) = filter.due_date {
        if task.due_date != due_date {
            return false;
        }
    }
    if let Some(due_before) = filter.due_before {
        if task.due_date >= due_before {
            return false;
        }
    }
    if let Some(created_from) = filter.created_from {
        if task.created_at < created_from {
            return false;
        }
    }
    if let Some(created_until) = filter.created_until {
        if task.created_at > created_until {
            return false;
        }
    }
    if let Some(search) = &filter.search {
        let name = task.name.as_ref().to_lowercase();
        if !name.contains(&search.to_lowercase()) {
            return false;
        }
    }
    true
}

#[async_trait::async_trait]
impl TaskStore for HashmapTaskStore {
    async fn add_task(&mut self, task: Task) -> Result<(), TaskStoreError> {
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    async fn get_task(
        &self,
        task_id: &TaskId,
    ) -> Result<Task, TaskStoreError> {
        match self.tasks.get(task_id) {
            Some(task) => Ok(task.clone()),
            None => Err(TaskStoreError::TaskNotFound),
        }
    }

    async fn get_tasks(
        &self,
        task_ids: &[TaskId],
    ) -> Result<Vec<Task>, TaskStoreError> {
        Ok(task_ids
            .iter()
            .filter_map(|task_id| self.tasks.get(task_id).cloned())
            .collect())
    }

    async fn list_tasks(
        &self,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, TaskStoreError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| matches(task, filter))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn count_tasks(
        &self,
        filter: &TaskFilter,
    ) -> Result<i64, TaskStoreError> {
        Ok(self
            .tasks
            .values()
            .filter(|task| matches(task, filter))
            .count() as i64)
    }

    async fn highest_position(
        &self,
        workspace_id: &WorkspaceId,
        status: TaskStatus,
    ) -> Result<Option<Position>, TaskStoreError> {
        Ok(self
            .tasks
            .values()
            .filter(|task| {
                &task.workspace_id == workspace_id && task.status == status
            })
            .map(|task| task.position)
            .max())
    }

    async fn update_task(
        &mut self,
        task: &Task,
    ) -> Result<(), TaskStoreError> {
        match self.tasks.get_mut(&task.id) {
            Some(existing) => {
                *existing = task.clone();
                Ok(())
            }
            None => Err(TaskStoreError::TaskNotFound),
        }
    }

    async fn delete_task(
        &mut self,
        task_id: &TaskId,
    ) -> Result<(), TaskStoreError> {
        match self.tasks.remove(task_id) {
            Some(_) => Ok(()),
            None => Err(TaskStoreError::TaskNotFound),
        }
    }

    async fn delete_tasks_in_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), TaskStoreError> {
        self.tasks
            .retain(|_, task| &task.workspace_id != workspace_id);
        Ok(())
    }

    async fn delete_tasks_in_project(
        &mut self,
        project_id: &ProjectId,
    ) -> Result<(), TaskStoreError> {
        self.tasks.retain(|_, task| &task.project_id != project_id);
        Ok(())
    }
}
