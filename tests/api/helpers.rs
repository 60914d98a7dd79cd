use std::sync::{Arc, Once};

use fake::faker::company::en::CompanyName;
use fake::Fake;
use reqwest::{cookie::Jar, Response};
use secrecy::Secret;
use serde_json::Value;
use test_context::AsyncTestContext;
use tokio::sync::RwLock;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

use workboard::{
    app_state::{
        AppState, MemberStoreType, ProjectStoreType, TaskStoreType,
        WorkspaceStoreType,
    },
    domain::UserId,
    services::{
        data_stores::{
            HashmapMemberStore, HashmapProjectStore, HashmapTaskStore,
            HashmapWorkspaceStore,
        },
        user_directory::HttpUserDirectory,
    },
    utils::{auth::generate_session_cookie, constants::test},
    Application,
};

static INIT: Once = Once::new();

// Sessions are minted by the external identity service in production; the
// tests share its secret and mint their own.
fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("JWT_SECRET", "integration-test-secret")
    });
}

pub const DIRECTORY_USER_NAME: &str = "Test User";
pub const DIRECTORY_USER_EMAIL: &str = "test@example.com";

pub struct TestApp {
    pub address: String,
    pub cookie_jar: Arc<Jar>,
    pub http_client: reqwest::Client,
    pub directory_server: MockServer,
    pub workspace_store: WorkspaceStoreType,
    pub member_store: MemberStoreType,
    pub project_store: ProjectStoreType,
    pub task_store: TaskStoreType,
}

impl TestApp {
    pub async fn new() -> Self {
        init_test_env();

        let workspace_store =
            Arc::new(RwLock::new(HashmapWorkspaceStore::default()));
        let member_store =
            Arc::new(RwLock::new(HashmapMemberStore::default()));
        let project_store =
            Arc::new(RwLock::new(HashmapProjectStore::default()));
        let task_store = Arc::new(RwLock::new(HashmapTaskStore::default()));

        let directory_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex("^/users/.+$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({
                    "name": DIRECTORY_USER_NAME,
                    "email": DIRECTORY_USER_EMAIL
                }),
            ))
            .mount(&directory_server)
            .await;

        let user_directory =
            Arc::new(configure_user_directory(directory_server.uri()));

        let app_state = AppState::new(
            workspace_store.clone(),
            member_store.clone(),
            project_store.clone(),
            task_store.clone(),
            user_directory,
        );

        let app = Application::build(app_state, test::APP_ADDRESS)
            .await
            .expect("Failed to build app");
        let address = format!("http://{}", app.address.clone());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run());

        let cookie_jar = Arc::new(Jar::default());
        let http_client = reqwest::Client::builder()
            .cookie_provider(cookie_jar.clone())
            .build()
            .unwrap();

        Self {
            address,
            cookie_jar,
            http_client,
            directory_server,
            workspace_store,
            member_store,
            project_store,
            task_store,
        }
    }

    /// Starts a session for a brand new user and returns their id.
    pub fn log_in(&self) -> UserId {
        let user_id = UserId::default();
        self.log_in_as(&user_id);
        user_id
    }

    /// Replaces the session cookie with one for the given user.
    pub fn log_in_as(&self, user_id: &UserId) {
        let cookie = generate_session_cookie(user_id)
            .expect("Failed to generate session cookie");
        let url = self
            .address
            .parse::<reqwest::Url>()
            .expect("Failed to parse test app address");
        self.cookie_jar.add_cookie_str(&cookie.to_string(), &url);
    }

    pub async fn get_workspaces(&self) -> Response {
        self.http_client
            .get(format!("{}/workspaces", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_workspaces<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/workspaces", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_workspace(&self, workspace_id: &str) -> Response {
        self.http_client
            .get(format!("{}/workspaces/{}", &self.address, workspace_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_workspace_info(&self, workspace_id: &str) -> Response {
        self.http_client
            .get(format!(
                "{}/workspaces/{}/info",
                &self.address, workspace_id
            ))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_workspace<Body>(
        &self,
        workspace_id: &str,
        body: &Body,
    ) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .patch(format!("{}/workspaces/{}", &self.address, workspace_id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_workspace(&self, workspace_id: &str) -> Response {
        self.http_client
            .delete(format!("{}/workspaces/{}", &self.address, workspace_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_join_workspace<Body>(
        &self,
        workspace_id: &str,
        body: &Body,
    ) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!(
                "{}/workspaces/{}/join",
                &self.address, workspace_id
            ))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_reset_invite_code(
        &self,
        workspace_id: &str,
    ) -> Response {
        self.http_client
            .post(format!(
                "{}/workspaces/{}/reset-invite-code",
                &self.address, workspace_id
            ))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_workspace_analytics(
        &self,
        workspace_id: &str,
    ) -> Response {
        self.http_client
            .get(format!(
                "{}/workspaces/{}/analytics",
                &self.address, workspace_id
            ))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_members(&self, workspace_id: &str) -> Response {
        self.http_client
            .get(format!("{}/members", &self.address))
            .query(&[("workspaceId", workspace_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_member(&self, member_id: &str) -> Response {
        self.http_client
            .delete(format!("{}/members/{}", &self.address, member_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_member<Body>(
        &self,
        member_id: &str,
        body: &Body,
    ) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .patch(format!("{}/members/{}", &self.address, member_id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_projects(&self, workspace_id: &str) -> Response {
        self.http_client
            .get(format!("{}/projects", &self.address))
            .query(&[("workspaceId", workspace_id)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_projects<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/projects", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_project(&self, project_id: &str) -> Response {
        self.http_client
            .get(format!("{}/projects/{}", &self.address, project_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_project<Body>(
        &self,
        project_id: &str,
        body: &Body,
    ) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .patch(format!("{}/projects/{}", &self.address, project_id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_project(&self, project_id: &str) -> Response {
        self.http_client
            .delete(format!("{}/projects/{}", &self.address, project_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_project_analytics(&self, project_id: &str) -> Response {
        self.http_client
            .get(format!(
                "{}/projects/{}/analytics",
                &self.address, project_id
            ))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_tasks(&self, query: &[(&str, &str)]) -> Response {
        self.http_client
            .get(format!("{}/tasks", &self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_tasks<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/tasks", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_task(&self, task_id: &str) -> Response {
        self.http_client
            .get(format!("{}/tasks/{}", &self.address, task_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_task<Body>(
        &self,
        task_id: &str,
        body: &Body,
    ) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .patch(format!("{}/tasks/{}", &self.address, task_id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_task(&self, task_id: &str) -> Response {
        self.http_client
            .delete(format!("{}/tasks/{}", &self.address, task_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_bulk_update_tasks<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/tasks/bulk-update", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

fn configure_user_directory(base_url: String) -> HttpUserDirectory {
    let http_client = reqwest::Client::builder()
        .timeout(test::user_directory::TIMEOUT)
        .build()
        .expect("Failed to build HTTP client");

    HttpUserDirectory::new(
        http_client,
        base_url,
        Secret::new("directory-token".to_owned()),
    )
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new().await
    }
}

pub fn random_name() -> String {
    CompanyName().fake()
}

pub async fn get_json_response_body(response: Response) -> Value {
    let body: Value = response
        .json()
        .await
        .expect("failed to parse response body JSON");
    body
}

/// Unwraps the `data` envelope of a successful response.
pub async fn get_response_data(response: Response) -> Value {
    get_json_response_body(response)
        .await
        .get("data")
        .expect("No data field in response")
        .to_owned()
}

/// Creates a workspace for the current session and returns
/// (workspace id, invite code).
pub async fn create_workspace(app: &mut TestApp) -> (String, String) {
    let response = app
        .post_workspaces(&serde_json::json!({ "name": random_name() }))
        .await;
    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to create workspace"
    );

    let data = get_response_data(response).await;
    (
        data["id"].as_str().expect("No workspace id").to_owned(),
        data["inviteCode"]
            .as_str()
            .expect("No invite code")
            .to_owned(),
    )
}

pub async fn create_project(
    app: &mut TestApp,
    workspace_id: &str,
) -> String {
    let response = app
        .post_projects(&serde_json::json!({
            "name": random_name(),
            "workspaceId": workspace_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201, "Failed to create project");

    let data = get_response_data(response).await;
    data["id"].as_str().expect("No project id").to_owned()
}

/// Member id of the current session's membership in a workspace.
pub async fn own_member_id(
    app: &mut TestApp,
    workspace_id: &str,
    user_id: &UserId,
) -> String {
    let response = app.get_members(workspace_id).await;
    assert_eq!(response.status().as_u16(), 200, "Failed to list members");

    let data = get_response_data(response).await;
    data.as_array()
        .expect("Expected a member array")
        .iter()
        .find(|member| member["userId"] == user_id.as_ref().to_string())
        .expect("No membership for user")["id"]
        .as_str()
        .expect("No member id")
        .to_owned()
}

/// Creates a task and returns its response data.
pub async fn create_task(
    app: &mut TestApp,
    workspace_id: &str,
    project_id: &str,
    assignee_id: &str,
    status: &str,
) -> Value {
    let response = app
        .post_tasks(&serde_json::json!({
            "name": random_name(),
            "status": status,
            "workspaceId": workspace_id,
            "projectId": project_id,
            "assigneeId": assignee_id,
            "dueDate": "2099-01-01T00:00:00Z"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201, "Failed to create task");

    get_response_data(response).await
}
