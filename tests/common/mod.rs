#![allow(dead_code)]

//! In-process stand-in for the campus todo backend: the six endpoints the
//! client consumes, with envelope-shaped responses and bearer-checked
//! routes, served over a real socket on an OS-assigned port.

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use uuid::Uuid;

use todo_client::api::ApiClient;
use todo_client::auth::AuthService;
use todo_client::config::ClientConfig;
use todo_client::session::MemorySessionStore;

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret";
pub const EMAIL: &str = "alice@example.com";

#[derive(Clone, Serialize)]
struct StoredTodo {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    description: String,
}

#[derive(Default)]
struct Backend {
    sessions: HashSet<String>,
    todos: Vec<StoredTodo>,
}

type Shared = Arc<RwLock<Backend>>;

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct TodoBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

fn router() -> Router {
    let state: Shared = Arc::new(RwLock::new(Backend::default()));
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/profile", get(profile))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", put(update_todo).delete(delete_todo))
        .with_state(state)
}

/// Bind to an OS-assigned port and serve the mock backend; returns the base
/// URL.
pub async fn spawn() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL that refuses connections: a port that was bound and released.
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Client over a fresh in-memory session store.
pub fn api_client(base_url: &str) -> ApiClient {
    let store = Arc::new(MemorySessionStore::new());
    ApiClient::new(ClientConfig::new(base_url), store).unwrap()
}

/// Client that has already logged in with the fixture credentials.
pub async fn authed_client(base_url: &str) -> ApiClient {
    let api = api_client(base_url);
    AuthService::new(api.clone())
        .login(USERNAME, PASSWORD)
        .await
        .unwrap();
    api
}

async fn authorize(state: &Shared, headers: &HeaderMap) -> bool {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match token {
        Some(token) => state.read().await.sessions.contains(token),
        None => false,
    }
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthorized" })),
    )
}

async fn login(
    State(state): State<Shared>,
    Json(body): Json<LoginBody>,
) -> (StatusCode, Json<Value>) {
    if body.username != USERNAME || body.password != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid username or password" })),
        );
    }
    let token = Uuid::new_v4().to_string();
    state.write().await.sessions.insert(token.clone());
    (StatusCode::OK, Json(json!({ "data": { "token": token } })))
}

async fn profile(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorize(&state, &headers).await {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({
            "data": {
                "username": USERNAME,
                "email": EMAIL,
                "createdAt": chrono::Utc::now().to_rfc3339(),
            }
        })),
    )
}

async fn list_todos(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorize(&state, &headers).await {
        return unauthorized();
    }
    let todos = state.read().await.todos.clone();
    (StatusCode::OK, Json(json!({ "data": todos })))
}

async fn create_todo(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<TodoBody>,
) -> (StatusCode, Json<Value>) {
    if !authorize(&state, &headers).await {
        return unauthorized();
    }
    if body.title.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Title is required" })),
        );
    }
    let todo = StoredTodo {
        id: Uuid::new_v4().to_string(),
        title: body.title,
        description: body.description,
    };
    state.write().await.todos.push(todo.clone());
    (StatusCode::CREATED, Json(json!({ "data": todo })))
}

async fn update_todo(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<TodoBody>,
) -> (StatusCode, Json<Value>) {
    if !authorize(&state, &headers).await {
        return unauthorized();
    }
    let mut backend = state.write().await;
    match backend.todos.iter_mut().find(|t| t.id == id) {
        Some(todo) => {
            todo.title = body.title;
            todo.description = body.description;
            (StatusCode::OK, Json(json!({})))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Todo not found" })),
        ),
    }
}

async fn delete_todo(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorize(&state, &headers).await {
        return unauthorized();
    }
    let mut backend = state.write().await;
    let before = backend.todos.len();
    backend.todos.retain(|t| t.id != id);
    if backend.todos.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Todo not found" })),
        );
    }
    (StatusCode::OK, Json(json!({})))
}
