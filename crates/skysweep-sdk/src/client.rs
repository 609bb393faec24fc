//! SkySweep SDK client for flight history and sweep dispatch.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skysweep_core::{
    CoverageGrid, DispatchRequest, FlightLog, GridLine, Rectangle, StoredFlightLog, StoredId,
};

/// Client for connecting to the SkySweep server.
pub struct SkysweepClient {
    pub(crate) base_url: String,
    pub(crate) client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: StoredId,
}

#[derive(Debug, Deserialize)]
struct GridResponse {
    lines: Vec<GridLine>,
}

#[derive(Debug, Serialize)]
struct DispatchAreaRequest<'a> {
    area: Option<&'a Rectangle>,
}

/// Server reply to a dispatch attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchReply {
    /// HTTP status returned by the server.
    #[serde(skip)]
    pub status: u16,
    /// Text to show the operator.
    pub message: String,
    #[serde(default)]
    pub request: Option<DispatchRequest>,
}

impl DispatchReply {
    pub fn is_dispatched(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl SkysweepClient {
    /// Create a new SkySweep client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store a flight log, returning its id.
    pub async fn save_flight_log(&self, log: &FlightLog) -> Result<StoredId> {
        let url = format!("{}/v1/flight-logs", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(log)
            .send()
            .await
            .context("Failed to send flight log")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Failed to save flight log: {} {}", status, body);
        }

        let created: CreatedResponse = response
            .json()
            .await
            .context("Failed to parse save response")?;
        Ok(created.id)
    }

    /// Fetch the full flight history.
    pub async fn list_history(&self) -> Result<Vec<StoredFlightLog>> {
        let url = format!("{}/api/flight-history/history", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch flight history")?;

        if !response.status().is_success() {
            anyhow::bail!("Flight history unavailable: {}", response.status());
        }

        response
            .json()
            .await
            .context("Failed to parse flight history")
    }

    /// Ask the server for the coverage grid of `area`.
    pub async fn plan_grid(&self, area: &Rectangle) -> Result<CoverageGrid> {
        let url = format!("{}/v1/area/grid", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(area)
            .send()
            .await
            .context("Failed to request coverage grid")?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to plan grid: {}", response.status());
        }

        let grid: GridResponse = response
            .json()
            .await
            .context("Failed to parse coverage grid")?;
        Ok(CoverageGrid { lines: grid.lines })
    }

    /// Request a sweep of `area` through the server.
    ///
    /// Refusals and dispatch failures come back as a reply with the
    /// operator message; only transport problems with the server itself are
    /// errors.
    pub async fn dispatch_area(&self, area: Option<&Rectangle>) -> Result<DispatchReply> {
        let url = format!("{}/v1/dispatch/rectangle", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&DispatchAreaRequest { area })
            .send()
            .await
            .context("Failed to reach SkySweep server")?;

        let status = response.status().as_u16();
        let mut reply: DispatchReply = response
            .json()
            .await
            .context("Failed to parse dispatch reply")?;
        reply.status = status;
        tracing::debug!(status, message = %reply.message, "Dispatch reply");
        Ok(reply)
    }
}
