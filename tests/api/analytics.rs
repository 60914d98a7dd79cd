use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use test_context::test_context;

use workboard::{
    domain::{
        MemberId, Position, ProjectId, Task, TaskName, TaskStatus,
        WorkspaceId,
    },
    utils::analytics::month_before,
};

use crate::helpers::{
    create_project, create_workspace, get_response_data, own_member_id,
    TestApp,
};

struct Board {
    workspace_id: String,
    project_id: String,
    member_id: String,
}

async fn set_up_board(app: &mut TestApp) -> Board {
    let user_id = app.log_in();
    let (workspace_id, _) = create_workspace(app).await;
    let project_id = create_project(app, &workspace_id).await;
    let member_id = own_member_id(app, &workspace_id, &user_id).await;
    Board {
        workspace_id,
        project_id,
        member_id,
    }
}

async fn post_task(
    app: &mut TestApp,
    board: &Board,
    status: &str,
    due_date: &str,
) {
    let response = app
        .post_tasks(&json!({
            "name": "Analytics fixture",
            "status": status,
            "workspaceId": board.workspace_id,
            "projectId": board.project_id,
            "assigneeId": board.member_id,
            "dueDate": due_date
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201, "Failed to create task");
}

/// Inserts a task directly into the store with a back-dated creation time,
/// which the HTTP surface never allows.
async fn seed_task_created_at(
    app: &mut TestApp,
    board: &Board,
    status: TaskStatus,
    due_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
) {
    let mut task = Task::new(
        WorkspaceId::parse(&board.workspace_id).unwrap(),
        ProjectId::parse(&board.project_id).unwrap(),
        TaskName::parse("Back-dated fixture").unwrap(),
        status,
        MemberId::parse(&board.member_id).unwrap(),
        None,
        due_date,
        Position::new(1000),
    );
    task.created_at = created_at;

    app.task_store
        .write()
        .await
        .add_task(task)
        .await
        .expect("Failed to seed task");
}

fn far_future() -> DateTime<Utc> {
    "2099-01-01T00:00:00Z".parse().unwrap()
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_compare_current_month_against_the_previous_one(
    app: &mut TestApp,
) {
    let board = set_up_board(app).await;

    // Current month: one open, one overdue, one closed.
    post_task(app, &board, "ToDo", "2099-01-01T00:00:00Z").await;
    post_task(app, &board, "InProgress", "2000-01-01T00:00:00Z").await;
    post_task(app, &board, "Closed", "2000-01-01T00:00:00Z").await;

    // Previous month: a single open task, not yet due.
    let last_month = month_before(Utc::now()).unwrap().start
        + Duration::hours(1);
    seed_task_created_at(
        app,
        &board,
        TaskStatus::ToDo,
        far_future(),
        last_month,
    )
    .await;

    let response = app.get_workspace_analytics(&board.workspace_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let data = get_response_data(response).await;

    assert_eq!(data["taskCount"], 3);
    assert_eq!(data["taskDifference"], 2);
    assert_eq!(data["assignedTaskCount"], 3);
    assert_eq!(data["assignedTaskDifference"], 2);
    assert_eq!(data["completedTaskCount"], 1);
    assert_eq!(data["completedTaskDifference"], 1);
    assert_eq!(data["incompleteTaskCount"], 2);
    assert_eq!(data["incompleteTaskDifference"], 1);
    assert_eq!(data["overdueTaskCount"], 1);
    assert_eq!(data["overdueTaskDifference"], 1);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_not_count_closed_or_future_tasks_as_overdue(
    app: &mut TestApp,
) {
    let board = set_up_board(app).await;

    // A closed task past its due date is finished, not overdue, and an
    // open task due in the future is simply pending.
    post_task(app, &board, "Closed", "2000-01-01T00:00:00Z").await;
    post_task(app, &board, "ToDo", "2099-01-01T00:00:00Z").await;

    let data = get_response_data(
        app.get_workspace_analytics(&board.workspace_id).await,
    )
    .await;
    assert_eq!(data["overdueTaskCount"], 0);

    post_task(app, &board, "InReview", "2000-01-01T00:00:00Z").await;
    let data = get_response_data(
        app.get_workspace_analytics(&board.workspace_id).await,
    )
    .await;
    assert_eq!(data["overdueTaskCount"], 1);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_scope_project_analytics_to_the_project(app: &mut TestApp) {
    let board = set_up_board(app).await;
    let other_project_id = create_project(app, &board.workspace_id).await;

    post_task(app, &board, "ToDo", "2099-01-01T00:00:00Z").await;
    post_task(app, &board, "ToDo", "2099-01-01T00:00:00Z").await;

    // One task in the other project, visible to workspace analytics only.
    let response = app
        .post_tasks(&json!({
            "name": "Other project task",
            "status": "ToDo",
            "workspaceId": board.workspace_id,
            "projectId": other_project_id,
            "assigneeId": board.member_id,
            "dueDate": "2099-01-01T00:00:00Z"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let data = get_response_data(
        app.get_project_analytics(&board.project_id).await,
    )
    .await;
    assert_eq!(data["taskCount"], 2);

    let data = get_response_data(
        app.get_workspace_analytics(&board.workspace_id).await,
    )
    .await;
    assert_eq!(data["taskCount"], 3);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_require_membership_for_project_analytics(app: &mut TestApp) {
    let board = set_up_board(app).await;

    app.log_in();
    let response = app.get_project_analytics(&board.project_id).await;
    assert_eq!(response.status().as_u16(), 401);
}
