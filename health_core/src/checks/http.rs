//! HTTP GET check. Also covers queue management aliveness endpoints such as
//! RabbitMQ's `/api/aliveness-test/%2f`.

use crate::error::{HealthError, Result};
use crate::health::{Check, CheckContext};
use anyhow::Context;
use reqwest::Client;
use std::time::Duration;

pub const UNAVAILABLE_MESSAGE: &str = "remote service is not available at the moment";

#[derive(Debug, Clone)]
pub struct HttpCheckConfig {
    pub url: String,
    pub request_timeout: Duration,
}

impl HttpCheckConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            request_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

pub struct HttpCheck {
    client: Client,
    url: String,
}

impl HttpCheck {
    pub fn new(config: HttpCheckConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(HealthError::Validation("HTTP check URL cannot be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| HealthError::Other(anyhow::anyhow!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl Check for HttpCheck {
    async fn check(&self, ctx: CheckContext) -> anyhow::Result<()> {
        let response = self
            .client
            .get(&self.url)
            .timeout(ctx.remaining())
            .send()
            .await
            .context("making the request for the health check failed")?;

        if response.status().is_server_error() {
            anyhow::bail!(UNAVAILABLE_MESSAGE);
        }

        Ok(())
    }
}
