use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// Body shape shared by every endpoint: `{ data?, message? }`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawEnvelope {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A decoded response: `ok` is derived from the HTTP status, `data` and
/// `message` come from the body when present.
#[derive(Debug)]
pub struct Envelope {
    pub ok: bool,
    pub status: u16,
    pub data: Option<Value>,
    pub message: Option<String>,
}

impl Envelope {
    /// The server message, or the per-operation fallback.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Deserialize the `data` field into a typed value.
    pub fn decode_data<T: serde::de::DeserializeOwned>(self) -> Result<T, ApiError> {
        let data = self
            .data
            .ok_or_else(|| ApiError::Decode("missing data field".to_string()))?;
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Payload of a successful login: `data.token`.
#[derive(Debug, Deserialize)]
pub struct TokenData {
    pub token: String,
}
