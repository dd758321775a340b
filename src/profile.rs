use reqwest::Method;

use crate::api::ApiClient;
use crate::error::{ApiError, ProfileError};
use crate::models::User;

/// Fetches the authenticated user's profile.
pub struct ProfileService {
    api: ApiClient,
}

impl ProfileService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch(&self) -> Result<User, ProfileError> {
        let env = self
            .api
            .request(Method::GET, "/api/profile", None, true)
            .await
            .map_err(|e| match e {
                ApiError::NoSession => ProfileError::NotAuthenticated,
                other => ProfileError::Api(other),
            })?;

        if !env.ok {
            return Err(ProfileError::Fetch("Failed to fetch profile".to_string()));
        }

        env.decode_data::<User>().map_err(|e| match e {
            ApiError::Decode(msg) => ProfileError::Decode(msg),
            other => ProfileError::Api(other),
        })
    }
}
