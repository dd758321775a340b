use std::sync::Arc;

use reqwest::Method;
use serde_json::json;
use tracing::info;

use crate::api::ApiClient;
use crate::api::dto::TokenData;
use crate::error::{ApiError, AuthError, StoreError};
use crate::session::SessionStore;

/// Exchanges credentials for a bearer token and commits it to the session
/// store. A failed login leaves the store untouched.
pub struct AuthService {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        let store = api.store();
        Self { api, store }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let body = json!({ "username": username, "password": password });
        let env = self
            .api
            .request(Method::POST, "/api/auth/login", Some(body), false)
            .await
            .map_err(|e| match e {
                ApiError::Connection(_) => AuthError::Unreachable,
                other => AuthError::Api(other),
            })?;

        if !env.ok {
            return Err(AuthError::InvalidCredentials(
                env.message_or("Invalid credentials"),
            ));
        }

        let session: TokenData = env.decode_data().map_err(AuthError::Api)?;
        self.store.save(&session.token)?;
        info!("login succeeded for {}", username);
        Ok(())
    }

    /// Destroys the current session.
    pub fn logout(&self) -> Result<(), StoreError> {
        info!("session cleared");
        self.store.clear()
    }
}
