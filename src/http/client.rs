use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::rate_limiter::RateLimiter;

/// HTTP client with built-in request pacing
///
/// One instance is shared for the whole run; calls are serialized by the
/// orchestrator, never issued concurrently.
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Paced GET. The raw reqwest error is returned untouched so the
    /// caller can classify timeouts vs. transport failures.
    pub async fn get(&mut self, url: &str) -> reqwest::Result<reqwest::Response> {
        self.rate_limiter.wait().await;
        self.client.get(url).send().await
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }
}
