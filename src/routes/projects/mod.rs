use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Project;

mod create_project;
mod delete_project;
mod get_project;
mod list_projects;
mod project_analytics;
mod update_project;

pub use create_project::*;
pub use delete_project::*;
pub use get_project::*;
pub use list_projects::*;
pub use project_analytics::*;
pub use update_project::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.as_ref().to_string(),
            workspace_id: project.workspace_id.as_ref().to_string(),
            name: project.name.as_ref().to_owned(),
            image_url: project.image_url,
            created_at: project.created_at,
        }
    }
}
