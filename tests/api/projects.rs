use serde_json::json;
use test_context::test_context;

use crate::helpers::{
    create_project, create_task, create_workspace, get_response_data,
    own_member_id, random_name, TestApp,
};

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_for_valid_requests(app: &mut TestApp) {
    app.log_in();
    let (workspace_id, _) = create_workspace(app).await;

    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "description": "",
      "type": "object",
      "properties": {
        "id": {
          "type": "string",
          "minLength": 36,
          "maxLength": 36
        },
        "workspaceId": {
          "type": "string",
          "minLength": 36,
          "maxLength": 36
        },
        "name": {
          "type": "string",
          "minLength": 1,
          "maxLength": 255
        },
        "createdAt": {
          "type": "string"
        }
      },
      "required": [
        "id",
        "workspaceId",
        "name",
        "createdAt"
      ]
    });

    let name = random_name();
    let response = app
        .post_projects(&json!({
            "name": name,
            "workspaceId": workspace_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let data = get_response_data(response).await;
    assert!(
        jsonschema::is_valid(&schema, &data),
        "response does not match schema: {data}"
    );
    assert_eq!(data["name"], name);
    assert_eq!(data["workspaceId"], workspace_id);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_projects_newest_first(app: &mut TestApp) {
    app.log_in();
    let (workspace_id, _) = create_workspace(app).await;

    let first = create_project(app, &workspace_id).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = create_project(app, &workspace_id).await;

    let data = get_response_data(app.get_projects(&workspace_id).await).await;
    let ids: Vec<&str> = data
        .as_array()
        .expect("Expected a project array")
        .iter()
        .map(|project| project["id"].as_str().unwrap())
        .collect();

    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_require_membership(app: &mut TestApp) {
    app.log_in();
    let (workspace_id, _) = create_workspace(app).await;
    let project_id = create_project(app, &workspace_id).await;

    app.log_in();
    assert_eq!(app.get_projects(&workspace_id).await.status().as_u16(), 401);
    assert_eq!(app.get_project(&project_id).await.status().as_u16(), 401);
    assert_eq!(
        app.post_projects(&json!({
            "name": random_name(),
            "workspaceId": workspace_id
        }))
        .await
        .status()
        .as_u16(),
        401
    );
    assert_eq!(
        app.delete_project(&project_id).await.status().as_u16(),
        401
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_let_plain_members_manage_projects(app: &mut TestApp) {
    app.log_in();
    let (workspace_id, invite_code) = create_workspace(app).await;
    let project_id = create_project(app, &workspace_id).await;

    // Project management needs membership only, unlike workspace management.
    app.log_in();
    app.post_join_workspace(&workspace_id, &json!({ "code": invite_code }))
        .await;

    let response = app
        .patch_project(&project_id, &json!({ "name": "Renamed" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(get_response_data(response).await["name"], "Renamed");

    let response = app.delete_project(&project_id).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_cascade_project_deletion_to_tasks(app: &mut TestApp) {
    let user_id = app.log_in();
    let (workspace_id, _) = create_workspace(app).await;
    let project_id = create_project(app, &workspace_id).await;
    let other_project_id = create_project(app, &workspace_id).await;
    let member_id = own_member_id(app, &workspace_id, &user_id).await;

    create_task(app, &workspace_id, &project_id, &member_id, "ToDo").await;
    create_task(app, &workspace_id, &project_id, &member_id, "Backlog").await;
    let survivor =
        create_task(app, &workspace_id, &other_project_id, &member_id, "ToDo")
            .await;

    let response = app.delete_project(&project_id).await;
    assert_eq!(response.status().as_u16(), 200);

    let data = get_response_data(
        app.get_tasks(&[("workspaceId", workspace_id.as_str())]).await,
    )
    .await;
    let tasks = data.as_array().expect("Expected a task array");
    assert_eq!(tasks.len(), 1, "Only the other project's task remains");
    assert_eq!(tasks[0]["id"], survivor["id"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_projects(app: &mut TestApp) {
    app.log_in();

    let response = app
        .get_project("5e90ca28-e1ad-4795-a190-089959c16e0b")
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_invalid_input(app: &mut TestApp) {
    app.log_in();
    let (workspace_id, _) = create_workspace(app).await;

    for name in ["", &"a".repeat(256)] {
        let response = app
            .post_projects(&json!({
                "name": name,
                "workspaceId": workspace_id
            }))
            .await;
        assert_eq!(response.status().as_u16(), 400);
    }
}
