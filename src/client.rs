use std::time::Duration;

use tracing::{debug, info};

use crate::error::ChartError;
use crate::payload::StatsTable;
use crate::request::StatsRequest;

/// The endpoint the prototype posted to.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:54321/3/Vis/Stats";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    /// No timeout by default; the prototype waited forever too, but a
    /// caller can opt in to surfacing one as a network error.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Async client for the stats endpoint: one POST per call, JSON body,
/// no retries.
#[derive(Debug, Clone)]
pub struct StatsClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl StatsClient {
    pub fn new(config: ClientConfig) -> Result<Self, ChartError> {
        let mut builder = reqwest::Client::builder().user_agent("statgraph/0.1");
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { config, http })
    }

    /// POST the request and return the raw 2xx body text. A non-2xx
    /// answer is an endpoint error carrying the status and body.
    pub async fn fetch(&self, request: &StatsRequest) -> Result<String, ChartError> {
        info!(endpoint = %self.config.endpoint, "requesting stats");
        let response = self
            .http
            .post(&self.config.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChartError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        debug!(payload = %body, "raw stats response");
        Ok(body)
    }

    /// Fetch and decode into a validated table.
    pub async fn fetch_table(&self, request: &StatsRequest) -> Result<StatsTable, ChartError> {
        let body = self.fetch(request).await?;
        StatsTable::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new();
        assert_eq!(config.endpoint, "http://localhost:54321/3/Vis/Stats");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = ClientConfig::new()
            .with_endpoint("http://127.0.0.1:8080/3/Vis/Stats")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.endpoint, "http://127.0.0.1:8080/3/Vis/Stats");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_client_builds_with_and_without_timeout() {
        assert!(StatsClient::new(ClientConfig::new()).is_ok());
        assert!(
            StatsClient::new(ClientConfig::new().with_timeout(Duration::from_secs(1))).is_ok()
        );
    }

    /// Runs only when a live stats endpoint is available.
    #[tokio::test]
    async fn integration_fetch_if_endpoint_present() {
        let Ok(endpoint) = std::env::var("STATGRAPH_LIVE_URL") else {
            eprintln!("STATGRAPH_LIVE_URL not set; skipping live endpoint test");
            return;
        };
        let client = StatsClient::new(
            ClientConfig::new()
                .with_endpoint(endpoint)
                .with_timeout(Duration::from_secs(10)),
        )
        .unwrap();
        let request = StatsRequest::stats("titanic_input.hex");
        let table = client.fetch_table(&request).await.unwrap();
        assert!(!table.column_names().is_empty());
    }
}
