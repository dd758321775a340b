use std::env;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_client::api::ApiClient;
use todo_client::auth::AuthService;
use todo_client::config::ClientConfig;
use todo_client::profile::ProfileService;
use todo_client::session::FileSessionStore;
use todo_client::todos::{HttpTodoApi, TodoList};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "todo_client=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::new_from_env()?;
    info!("using backend at {}", config.base_url);

    let session_file = env::var("SESSION_FILE").unwrap_or_else(|_| "session.json".to_string());
    let store = Arc::new(FileSessionStore::new(session_file));
    let api = ApiClient::new(config, store)?;

    // Log in when credentials are provided; otherwise reuse the persisted
    // session from a previous run.
    let auth = AuthService::new(api.clone());
    if let (Ok(username), Ok(password)) = (env::var("TODO_USERNAME"), env::var("TODO_PASSWORD")) {
        auth.login(&username, &password).await?;
    }

    let profile = ProfileService::new(api.clone()).fetch().await?;
    info!(
        "logged in as {} <{}>, member since {}",
        profile.username, profile.email, profile.created_at
    );

    let mut todos = TodoList::new(Arc::new(HttpTodoApi::new(api)));
    todos.refresh().await?;
    info!("{} todos", todos.items().len());
    for item in todos.items() {
        info!("[{}] {}: {}", item.id, item.title, item.description);
    }

    Ok(())
}
