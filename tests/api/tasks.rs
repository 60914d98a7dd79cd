use serde_json::json;
use test_context::test_context;

use workboard::domain::{TaskFilter, TaskId, WorkspaceId};

use crate::helpers::{
    create_project, create_task, create_workspace, get_json_response_body,
    get_response_data, own_member_id, TestApp, DIRECTORY_USER_NAME,
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

#[test_context(TestApp)]
#[tokio::test]
async fn should_assign_positions_in_thousand_steps(app: &mut TestApp) {
    let board = set_up_board(app).await;

    for expected_position in [1000, 2000, 3000] {
        let task = create_task(
            app,
            &board.workspace_id,
            &board.project_id,
            &board.member_id,
            "ToDo",
        )
        .await;
        assert_eq!(task["position"], expected_position);
    }

    // Columns rank independently, so a different status starts over.
    let task = create_task(
        app,
        &board.workspace_id,
        &board.project_id,
        &board.member_id,
        "Backlog",
    )
    .await;
    assert_eq!(task["position"], 1000);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_tasks_with_project_and_assignee(app: &mut TestApp) {
    let board = set_up_board(app).await;
    let task = create_task(
        app,
        &board.workspace_id,
        &board.project_id,
        &board.member_id,
        "InProgress",
    )
    .await;

    let data = get_response_data(
        app.get_tasks(&[("workspaceId", board.workspace_id.as_str())])
            .await,
    )
    .await;
    let tasks = data.as_array().expect("Expected a task array");
    assert_eq!(tasks.len(), 1);

    let listed = &tasks[0];
    assert_eq!(listed["id"], task["id"]);
    assert_eq!(listed["project"]["id"], board.project_id);
    assert_eq!(listed["assignee"]["id"], board.member_id);
    assert_eq!(listed["assignee"]["name"], DIRECTORY_USER_NAME);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_filter_tasks(app: &mut TestApp) {
    let board = set_up_board(app).await;
    let other_project_id = create_project(app, &board.workspace_id).await;

    let todo = create_task(
        app,
        &board.workspace_id,
        &board.project_id,
        &board.member_id,
        "ToDo",
    )
    .await;
    let backlog = create_task(
        app,
        &board.workspace_id,
        &other_project_id,
        &board.member_id,
        "Backlog",
    )
    .await;

    let data = get_response_data(
        app.get_tasks(&[
            ("workspaceId", board.workspace_id.as_str()),
            ("status", "ToDo"),
        ])
        .await,
    )
    .await;
    let tasks = data.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], todo["id"]);

    let data = get_response_data(
        app.get_tasks(&[
            ("workspaceId", board.workspace_id.as_str()),
            ("projectId", other_project_id.as_str()),
        ])
        .await,
    )
    .await;
    let tasks = data.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], backlog["id"]);

    // Search is a case-insensitive substring match on the name.
    let needle = todo["name"]
        .as_str()
        .unwrap()
        .to_uppercase()
        .chars()
        .take(4)
        .collect::<String>();
    let data = get_response_data(
        app.get_tasks(&[
            ("workspaceId", board.workspace_id.as_str()),
            ("search", needle.as_str()),
        ])
        .await,
    )
    .await;
    assert!(data
        .as_array()
        .unwrap()
        .iter()
        .any(|task| task["id"] == todo["id"]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_get_task_with_enrichment(app: &mut TestApp) {
    let board = set_up_board(app).await;
    let task = create_task(
        app,
        &board.workspace_id,
        &board.project_id,
        &board.member_id,
        "InReview",
    )
    .await;

    let response = app.get_task(task["id"].as_str().unwrap()).await;
    assert_eq!(response.status().as_u16(), 200);

    let data = get_response_data(response).await;
    assert_eq!(data["status"], "InReview");
    assert_eq!(data["project"]["id"], board.project_id);
    assert_eq!(data["assignee"]["id"], board.member_id);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_apply_partial_updates(app: &mut TestApp) {
    let board = set_up_board(app).await;
    let task = create_task(
        app,
        &board.workspace_id,
        &board.project_id,
        &board.member_id,
        "ToDo",
    )
    .await;

    let response = app
        .patch_task(
            task["id"].as_str().unwrap(),
            &json!({ "status": "Closed" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let data = get_response_data(response).await;
    assert_eq!(data["status"], "Closed");
    assert_eq!(data["name"], task["name"], "Omitted fields keep their value");
    assert_eq!(data["position"], task["position"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_delete_tasks(app: &mut TestApp) {
    let board = set_up_board(app).await;
    let task = create_task(
        app,
        &board.workspace_id,
        &board.project_id,
        &board.member_id,
        "ToDo",
    )
    .await;
    let task_id = task["id"].as_str().unwrap();

    let response = app.delete_task(task_id).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.get_task(task_id).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_require_membership_for_task_access(app: &mut TestApp) {
    let board = set_up_board(app).await;
    let task = create_task(
        app,
        &board.workspace_id,
        &board.project_id,
        &board.member_id,
        "ToDo",
    )
    .await;
    let task_id = task["id"].as_str().unwrap();

    app.log_in();
    assert_eq!(app.get_task(task_id).await.status().as_u16(), 401);
    assert_eq!(
        app.patch_task(task_id, &json!({ "status": "Closed" }))
            .await
            .status()
            .as_u16(),
        401
    );
    assert_eq!(app.delete_task(task_id).await.status().as_u16(), 401);
    assert_eq!(
        app.get_tasks(&[("workspaceId", board.workspace_id.as_str())])
            .await
            .status()
            .as_u16(),
        401
    );
    assert_eq!(
        app.post_bulk_update_tasks(&json!({
            "tasks": [{ "id": task_id, "status": "Closed", "position": 1000 }]
        }))
        .await
        .status()
        .as_u16(),
        401
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_bulk_update_statuses_and_positions(app: &mut TestApp) {
    let board = set_up_board(app).await;
    let first = create_task(
        app,
        &board.workspace_id,
        &board.project_id,
        &board.member_id,
        "ToDo",
    )
    .await;
    let second = create_task(
        app,
        &board.workspace_id,
        &board.project_id,
        &board.member_id,
        "ToDo",
    )
    .await;

    // Swap the two tasks and move the first into another column.
    let response = app
        .post_bulk_update_tasks(&json!({
            "tasks": [
                {
                    "id": first["id"],
                    "status": "InProgress",
                    "position": 1000
                },
                { "id": second["id"], "status": "ToDo", "position": 1000 }
            ]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let data = get_response_data(response).await;
    let updated = data.as_array().expect("Expected a task array");
    assert_eq!(updated.len(), 2);
    assert_eq!(updated[0]["status"], "InProgress");
    assert_eq!(updated[0]["position"], 1000);
    assert_eq!(updated[1]["status"], "ToDo");
    assert_eq!(updated[1]["position"], 1000);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_out_of_range_bulk_positions(app: &mut TestApp) {
    let board = set_up_board(app).await;
    let task = create_task(
        app,
        &board.workspace_id,
        &board.project_id,
        &board.member_id,
        "ToDo",
    )
    .await;

    for position in [0, 999, 1_000_001] {
        let response = app
            .post_bulk_update_tasks(&json!({
                "tasks": [{
                    "id": task["id"],
                    "status": "ToDo",
                    "position": position
                }]
            }))
            .await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Position {position} should be rejected"
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_cross_workspace_bulk_updates_without_writing(
    app: &mut TestApp,
) {
    let first_board = set_up_board(app).await;
    let first_task = create_task(
        app,
        &first_board.workspace_id,
        &first_board.project_id,
        &first_board.member_id,
        "ToDo",
    )
    .await;

    let second_board = set_up_board(app).await;
    let second_task = create_task(
        app,
        &second_board.workspace_id,
        &second_board.project_id,
        &second_board.member_id,
        "ToDo",
    )
    .await;

    let response = app
        .post_bulk_update_tasks(&json!({
            "tasks": [
                {
                    "id": first_task["id"],
                    "status": "Closed",
                    "position": 5000
                },
                {
                    "id": second_task["id"],
                    "status": "Closed",
                    "position": 5000
                }
            ]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(
        get_json_response_body(response).await["error"],
        "All tasks must belong to the same workspace"
    );

    // Neither task was touched.
    for (task, workspace_id) in [
        (&first_task, &first_board.workspace_id),
        (&second_task, &second_board.workspace_id),
    ] {
        let filter = TaskFilter::for_workspace(
            WorkspaceId::parse(workspace_id).unwrap(),
        );
        let stored = app
            .task_store
            .read()
            .await
            .list_tasks(&filter)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(
            stored[0].id,
            TaskId::parse(task["id"].as_str().unwrap()).unwrap()
        );
        assert_eq!(stored[0].status.as_str(), "ToDo");
        assert_eq!(stored[0].position.value_of(), 1000);
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_when_bulk_update_references_unknown_tasks(
    app: &mut TestApp,
) {
    let board = set_up_board(app).await;
    let task = create_task(
        app,
        &board.workspace_id,
        &board.project_id,
        &board.member_id,
        "ToDo",
    )
    .await;

    let response = app
        .post_bulk_update_tasks(&json!({
            "tasks": [
                { "id": task["id"], "status": "Closed", "position": 2000 },
                {
                    "id": "5e90ca28-e1ad-4795-a190-089959c16e0b",
                    "status": "Closed",
                    "position": 3000
                }
            ]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_invalid_task_input(app: &mut TestApp) {
    let board = set_up_board(app).await;

    let response = app
        .post_tasks(&json!({
            "name": "Valid name",
            "status": "Done",
            "workspaceId": board.workspace_id,
            "projectId": board.project_id,
            "assigneeId": board.member_id,
            "dueDate": "2099-01-01T00:00:00Z"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        get_json_response_body(response).await["error"],
        "Validation error: Invalid status: Done"
    );

    let response = app
        .post_tasks(&json!({
            "name": "",
            "status": "ToDo",
            "workspaceId": board.workspace_id,
            "projectId": board.project_id,
            "assigneeId": board.member_id,
            "dueDate": "2099-01-01T00:00:00Z"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}
