use crate::{FetchError, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Source of JSON documents addressed by url.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and parse the body as JSON. Non-success statuses are errors.
    async fn get_json(&self, url: &str) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout; a hung request fails with a network error after this long
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: format!("holonet/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::network(url, e))?;
        serde_json::from_str(&body).map_err(|e| FetchError::decode(url, e))
    }
}
