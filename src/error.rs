use thiserror::Error;

/// Failures of the token storage primitive.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session record is corrupt: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures of the HTTP client and the todo operations built on it.
///
/// Display strings are the user-facing notification text, so callers can
/// surface an error directly.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Client setup error: {0}")]
    Setup(String),

    #[error("Failed to connect to server")]
    Connection(#[source] reqwest::Error),

    #[error("Malformed server response: {0}")]
    Decode(String),

    #[error("No session token")]
    NoSession,

    #[error("{0}")]
    Server(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Failed to connect to server")]
    Unreachable,

    #[error(transparent)]
    Api(ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("No token found")]
    NotAuthenticated,

    #[error("{0}")]
    Fetch(String),

    #[error("Malformed profile response: {0}")]
    Decode(String),

    #[error(transparent)]
    Api(ApiError),
}
