use std::env;

use crate::error::ApiError;

/// Where the backend lives. The mobile app hardcoded per-device hosts; here
/// the base URL is configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn new_from_env() -> Result<Self, ApiError> {
        let base_url = env::var("API_BASE_URL")
            .map_err(|_| ApiError::Setup("API_BASE_URL is not set".to_string()))?;
        Ok(Self::new(&base_url))
    }
}
