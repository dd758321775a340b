use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use tracing::warn;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::TodoItem;

/// The remote CRUD seam. Every operation requires a session token; with no
/// token stored the HTTP implementation fails with `NoSession` before
/// touching the network.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list(&self) -> Result<Vec<TodoItem>, ApiError>;
    async fn create(&self, title: &str, description: &str) -> Result<TodoItem, ApiError>;
    async fn update(&self, id: &str, title: &str, description: &str) -> Result<(), ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

pub struct HttpTodoApi {
    api: ApiClient,
}

impl HttpTodoApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<Vec<TodoItem>, ApiError> {
        let env = self.api.request(Method::GET, "/api/todos", None, true).await?;
        // A response with no data field is an empty collection.
        match env.data {
            Some(data) => serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn create(&self, title: &str, description: &str) -> Result<TodoItem, ApiError> {
        let body = json!({ "title": title, "description": description });
        let env = self
            .api
            .request(Method::POST, "/api/todos", Some(body), true)
            .await?;
        if !env.ok {
            return Err(ApiError::Server(env.message_or("Error adding todo")));
        }
        env.decode_data()
    }

    async fn update(&self, id: &str, title: &str, description: &str) -> Result<(), ApiError> {
        let body = json!({ "title": title, "description": description });
        let env = self
            .api
            .request(Method::PUT, &format!("/api/todos/{}", id), Some(body), true)
            .await?;
        if !env.ok {
            return Err(ApiError::Server(env.message_or("Error editing todo")));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let env = self
            .api
            .request(Method::DELETE, &format!("/api/todos/{}", id), None, true)
            .await?;
        if !env.ok {
            // Delete failures never carry a server message.
            warn!("delete of todo {} rejected with status {}", id, env.status);
            return Err(ApiError::Server("Error deleting todo".to_string()));
        }
        Ok(())
    }
}

/// The local working copy of the todo collection.
///
/// Items keep server order; every successful mutation reconciles the copy
/// with the server (prepend on create, patch by id on edit, remove by id on
/// delete), and every failed one leaves it unchanged. Update success bodies
/// carry no payload, so `edit` patches from the submitted values.
///
/// Mutating methods take `&mut self`, so one list cannot run two mutations
/// at once; nothing deduplicates the same submission arriving through two
/// handles.
pub struct TodoList {
    api: Arc<dyn TodoApi>,
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new(api: Arc<dyn TodoApi>) -> Self {
        Self {
            api,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Replace the local copy with the server's collection.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        self.items = self.api.list().await?;
        Ok(())
    }

    /// Create an item and prepend the server-assigned record.
    pub async fn add(&mut self, title: &str, description: &str) -> Result<TodoItem, ApiError> {
        let created = self.api.create(title, description).await?;
        self.items.insert(0, created.clone());
        Ok(created)
    }

    /// Update an item, then patch the local record's title and description.
    /// The id is never altered.
    pub async fn edit(&mut self, id: &str, title: &str, description: &str) -> Result<(), ApiError> {
        self.api.update(id, title, description).await?;
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.title = title.to_string();
            item.description = description.to_string();
        }
        Ok(())
    }

    /// Delete an item, then drop the local record.
    pub async fn remove(&mut self, id: &str) -> Result<(), ApiError> {
        self.api.delete(id).await?;
        self.items.retain(|item| item.id != id);
        Ok(())
    }
}
