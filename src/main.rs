use std::sync::Arc;
use tokio::sync::RwLock;

use workboard::{
    app_state::AppState,
    get_postgres_pool,
    services::{
        data_stores::{
            PostgresMemberStore, PostgresProjectStore, PostgresTaskStore,
            PostgresWorkspaceStore,
        },
        user_directory::HttpUserDirectory,
    },
    utils::{
        constants::{
            prod, DATABASE_URL, USER_DIRECTORY_TOKEN, USER_DIRECTORY_URL,
        },
        tracing::init_tracing,
    },
    Application,
};

#[tokio::main]
async fn main() {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    let pg_pool = configure_postgresql().await;

    let workspace_store =
        Arc::new(RwLock::new(PostgresWorkspaceStore::new(pg_pool.clone())));
    let member_store =
        Arc::new(RwLock::new(PostgresMemberStore::new(pg_pool.clone())));
    let project_store =
        Arc::new(RwLock::new(PostgresProjectStore::new(pg_pool.clone())));
    let task_store = Arc::new(RwLock::new(PostgresTaskStore::new(pg_pool)));
    let user_directory = Arc::new(configure_user_directory());

    let app_state = AppState::new(
        workspace_store,
        member_store,
        project_store,
        task_store,
        user_directory,
    );

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .expect("Failed to build app");

    app.run().await.expect("Failed to run app");
}

async fn configure_postgresql() -> sqlx::PgPool {
    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .expect("Failed to create Postgres connection pool!");

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    pg_pool
}

fn configure_user_directory() -> HttpUserDirectory {
    let http_client = reqwest::Client::builder()
        .timeout(prod::user_directory::TIMEOUT)
        .build()
        .expect("Failed to build HTTP client");

    HttpUserDirectory::new(
        http_client,
        USER_DIRECTORY_URL.to_owned(),
        USER_DIRECTORY_TOKEN.clone(),
    )
}
