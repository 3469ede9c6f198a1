use std::fmt;
use std::time::Duration;

use anyhow::Result;
use log::warn;
use tokio::time::sleep;

use crate::config::settings::ScraperSettings;
use crate::http::RateLimitedClient;

/// Why a page could not be retrieved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Every attempt timed out or stalled
    Timeout,
    /// Connection-level failure (refused, DNS, TLS); not retried
    Transport(String),
    /// The server answered with a non-2xx status
    HttpStatus(u16),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Timeout => write!(f, "timed out after all retry attempts"),
            FetchFailure::Transport(message) => write!(f, "transport error: {message}"),
            FetchFailure::HttpStatus(code) => write!(f, "HTTP status {code}"),
        }
    }
}

/// Retrieves raw page markup, with bounded retry on timeouts
pub struct PageFetcher {
    client: RateLimitedClient,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl PageFetcher {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;

        Ok(Self {
            client,
            retry_attempts: settings.retry_attempts,
            retry_delay: Duration::from_millis(settings.retry_delay_ms),
        })
    }

    /// Fetch one page. Timeouts are retried up to the configured ceiling
    /// with a fixed delay in between; transport errors and non-2xx
    /// statuses fail immediately.
    pub async fn fetch(&mut self, url: &str) -> Result<String, FetchFailure> {
        let mut timeouts = 0;

        loop {
            match self.attempt(url).await {
                Ok(body) => return Ok(body),
                Err(FetchFailure::Timeout) => {
                    timeouts += 1;
                    if timeouts > self.retry_attempts {
                        return Err(FetchFailure::Timeout);
                    }
                    warn!(
                        "Timed out fetching {} (attempt {}/{}), retrying",
                        url,
                        timeouts,
                        self.retry_attempts + 1
                    );
                    sleep(self.retry_delay).await;
                }
                Err(failure) => return Err(failure),
            }
        }
    }

    async fn attempt(&mut self, url: &str) -> Result<String, FetchFailure> {
        let response = self.client.get(url).await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::HttpStatus(status.as_u16()));
        }

        response.text().await.map_err(classify)
    }
}

fn classify(error: reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout
    } else {
        FetchFailure::Transport(error.to_string())
    }
}
