//! HTTP client for the atos API.

use std::time::Duration;

use atos_core::{Ato, AtoPayload};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx response. `message` is the body's `error` field, if any.
    #[error("server returned {status}")]
    Server { status: u16, message: Option<String> },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client for the `/atos` resource.
pub struct AtosClient {
    client: reqwest::Client,
    base_url: String,
}

impl AtosClient {
    /// Create a client for the given API base URL.
    ///
    /// `base_url` should be like `http://localhost:3333`; a trailing slash is
    /// dropped.
    pub fn new(base_url: String) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Like [`new`](Self::new) but with a per-request timeout.
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: String, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /atos/` with the payload as JSON.
    ///
    /// The body is parsed as JSON before the status is looked at, so a
    /// non-JSON body is a [`ClientError::Json`] whatever the status.
    pub async fn create_ato(&self, payload: &AtoPayload) -> Result<Value, ClientError> {
        let url = format!("{}/atos/", self.base_url);

        info!(url = %url, numero = %payload.numero, "posting ato");
        let resp = self.client.post(&url).json(payload).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        debug!(status = status.as_u16(), body = %body, "create response");

        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: error_field(&body),
            });
        }

        info!(status = status.as_u16(), "ato created");
        Ok(body)
    }

    /// `GET /atos/{id}`.
    pub async fn get_ato(&self, id: i64) -> Result<Ato, ClientError> {
        let url = format!("{}/atos/{id}", self.base_url);

        info!(url = %url, "fetching ato");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| error_field(&body));
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let ato: Ato = serde_json::from_str(&text)?;
        Ok(ato)
    }
}

/// The `error` string of an error body such as `{"error": "numero duplicado"}`.
fn error_field(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}
