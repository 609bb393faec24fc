//! Drone-dispatch HTTP client.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use skysweep_core::{build_dispatch_request, DispatchRequest, InvalidAreaError, Rectangle};
use std::time::Duration;
use thiserror::Error;

/// Path of the rectangle sweep endpoint on the dispatch service.
pub const DISPATCH_RECTANGLE_PATH: &str = "/drone/dispatch/rectangle";

/// Why a dispatch did not go through.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No usable area to dispatch to; nothing was sent.
    #[error(transparent)]
    InvalidArea(#[from] InvalidAreaError),

    /// The request never got a response (connect, timeout, body).
    #[error("dispatch request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("dispatch endpoint rejected the request: {status} {body}")]
    Rejected { status: u16, body: String },
}

/// Response returned by the dispatch service for an accepted request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchAck {
    pub status: u16,
    pub body: Value,
}

/// HTTP client for the drone-dispatch service.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DispatchClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) request_id: Option<String>,
}

impl DispatchClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DispatchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            request_id: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Correlation id forwarded as `X-Request-ID`.
    pub fn set_request_id(&mut self, request_id: Option<String>) {
        self.request_id = request_id
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
    }

    fn apply_request_id(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.request_id.as_deref() {
            Some(value) => request.header("X-Request-ID", value),
            None => request,
        }
    }

    /// Build the request for `area` and send it. Fails before any network
    /// traffic when the area is missing or degenerate.
    pub async fn dispatch_area(
        &self,
        area: Option<&Rectangle>,
    ) -> Result<DispatchAck, DispatchError> {
        let request = build_dispatch_request(area)?;
        self.dispatch_rectangle(&request).await
    }

    /// Send a prepared request. No retries are attempted.
    pub async fn dispatch_rectangle(
        &self,
        request: &DispatchRequest,
    ) -> Result<DispatchAck, DispatchError> {
        let url = format!("{}{}", self.base_url, DISPATCH_RECTANGLE_PATH);

        let response = self
            .apply_request_id(self.client.post(&url).json(request))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Dispatch endpoint rejected request");
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        tracing::info!(
            top_left = ?request.top_left,
            bottom_right = ?request.bottom_right,
            "Drone dispatched"
        );

        Ok(DispatchAck {
            status: status.as_u16(),
            body,
        })
    }
}
