mod hashmap_member_store;
mod hashmap_project_store;
mod hashmap_task_store;
mod hashmap_workspace_store;
mod postgres_member_store;
mod postgres_project_store;
mod postgres_task_store;
mod postgres_workspace_store;

pub use hashmap_member_store::HashmapMemberStore;
pub use hashmap_project_store::HashmapProjectStore;
pub use hashmap_task_store::HashmapTaskStore;
pub use hashmap_workspace_store::HashmapWorkspaceStore;
pub use postgres_member_store::PostgresMemberStore;
pub use postgres_project_store::PostgresProjectStore;
pub use postgres_task_store::PostgresTaskStore;
pub use postgres_workspace_store::PostgresWorkspaceStore;
