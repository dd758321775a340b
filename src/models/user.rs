use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user's profile. Owned by the backend, read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub username: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
