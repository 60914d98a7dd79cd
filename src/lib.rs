use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    serve::Serve,
    Json, Router,
};

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::error::Error;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

use domain::ApiError;
pub mod routes;
use crate::utils::tracing::*;
use routes::{
    members::{delete_member, list_members, update_member_role},
    projects::{
        create_project, delete_project, get_project, list_projects,
        project_analytics, update_project,
    },
    tasks::{
        bulk_update_tasks, create_task, delete_task, get_task, list_tasks,
        update_task,
    },
    workspaces::{
        create_workspace, delete_workspace, get_workspace,
        get_workspace_info, join_workspace, list_workspaces,
        reset_invite_code, update_workspace, workspace_analytics,
    },
};
pub mod app_state;
pub mod domain;
pub mod services;
use app_state::AppState;
pub mod utils;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Envelope for every successful response body.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::Unauthorized => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            ApiError::MissingToken => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, "Missing token".to_string())
            }
            ApiError::InvalidToken => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ApiError::NotFound(id) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, format!("{id}"))
            }
            ApiError::ValidationError(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, format!("{message}"))
            }
            ApiError::Conflict(conflict) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::CONFLICT, format!("{conflict}"))
            }
            ApiError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error_message,
        });
        (status, body).into_response()
    }
}

fn log_error_chain(e: &(dyn Error + 'static), debug_level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        let str = format!("Caused by:\n\n{:?}", cause);
        report = format!("{}\n{}", report, str);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match debug_level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(
        app_state: AppState,
        address: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let allowed_origins = [
            "http://localhost:3000".parse()?,
            "http://127.0.0.1:3000".parse()?,
        ];

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_credentials(true)
            .allow_origin(allowed_origins);

        let router = Router::new()
            .route("/workspaces", get(list_workspaces))
            .route("/workspaces", post(create_workspace))
            .route("/workspaces/:workspace_id", get(get_workspace))
            .route("/workspaces/:workspace_id", patch(update_workspace))
            .route("/workspaces/:workspace_id", delete(delete_workspace))
            .route("/workspaces/:workspace_id/info", get(get_workspace_info))
            .route("/workspaces/:workspace_id/join", post(join_workspace))
            .route(
                "/workspaces/:workspace_id/reset-invite-code",
                post(reset_invite_code),
            )
            .route(
                "/workspaces/:workspace_id/analytics",
                get(workspace_analytics),
            )
            .route("/members", get(list_members))
            .route("/members/:member_id", delete(delete_member))
            .route("/members/:member_id", patch(update_member_role))
            .route("/projects", get(list_projects))
            .route("/projects", post(create_project))
            .route("/projects/:project_id", get(get_project))
            .route("/projects/:project_id", patch(update_project))
            .route("/projects/:project_id", delete(delete_project))
            .route("/projects/:project_id/analytics", get(project_analytics))
            .route("/tasks", get(list_tasks))
            .route("/tasks", post(create_task))
            .route("/tasks/bulk-update", post(bulk_update_tasks))
            .route("/tasks/:task_id", get(get_task))
            .route("/tasks/:task_id", patch(update_task))
            .route("/tasks/:task_id", delete(delete_task))
            .with_state(app_state)
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

#[allow(dead_code)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await
}
