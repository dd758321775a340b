pub mod dto;

use std::sync::Arc;

use reqwest::{Client, Method};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

pub use dto::Envelope;

/// HTTP entry point shared by every flow. Holds the connection pool, the
/// base URL and the session store; cheap to clone.
///
/// One request per call, awaited to completion: no retries, no timeout
/// override, no cancellation.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::Setup(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            config,
            store,
        })
    }

    pub fn store(&self) -> Arc<dyn SessionStore> {
        self.store.clone()
    }

    /// Issue one request and decode the response envelope.
    ///
    /// An authorized call with no stored token fails with `NoSession`
    /// before anything goes on the wire. Non-2xx statuses are not an
    /// error at this layer: the caller inspects `Envelope::ok` and
    /// surfaces the server message.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        authorized: bool,
    ) -> Result<Envelope, ApiError> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut request = self.client.request(method.clone(), &url);

        if authorized {
            let token = self.store.load()?.ok_or(ApiError::NoSession)?;
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, url, e);
            ApiError::Connection(e)
        })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        tracing::debug!("{} {} -> {}", method, url, status);

        parse_envelope(status.is_success(), status.as_u16(), &text)
    }
}

/// Build an `Envelope` from the status line and raw body. An empty body is
/// a valid empty envelope; PUT/DELETE success responses carry none.
fn parse_envelope(ok: bool, status: u16, body: &str) -> Result<Envelope, ApiError> {
    let raw: dto::RawEnvelope = if body.trim().is_empty() {
        dto::RawEnvelope::default()
    } else {
        serde_json::from_str(body).map_err(|e| {
            tracing::error!("Failed to parse response body: {}", e);
            ApiError::Decode(e.to_string())
        })?
    };

    Ok(Envelope {
        ok,
        status,
        data: raw.data,
        message: raw.message,
    })
}
