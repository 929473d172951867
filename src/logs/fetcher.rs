//! Log fetcher for retrieving request logs from the HTTP endpoint
//!
//! Wraps a reqwest client. In fallback mode any failed attempt is replaced by
//! the built-in sample dataset; in strict mode failures are retried
//! sequentially with exponential backoff and the last error is surfaced.

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::config::SourceConfig;
use crate::error::FetchError;
use crate::logs::model::LogRecord;
use crate::logs::sample::sample_logs;

/// Where a successful outcome's records came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Remote,
    Sample,
}

/// Records handed from the fetcher to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub records: Vec<LogRecord>,
    pub source: DataSource,
}

impl FetchOutcome {
    pub fn remote(records: Vec<LogRecord>) -> Self {
        Self {
            records,
            source: DataSource::Remote,
        }
    }

    pub fn sample() -> Self {
        Self {
            records: sample_logs(),
            source: DataSource::Sample,
        }
    }
}

/// Sequential retry schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based): `base * 2^(retry-1)`, capped
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl From<&SourceConfig> for RetryPolicy {
    fn from(cfg: &SourceConfig) -> Self {
        Self {
            retries: cfg.retry,
            base_delay: Duration::from_millis(cfg.retry_delay_ms),
            max_delay: Duration::from_millis(cfg.max_retry_delay_ms),
        }
    }
}

/// HTTP client wrapper for fetching request logs
#[derive(Debug, Clone)]
pub struct LogFetcher {
    client: Client,
    url: String,
    policy: RetryPolicy,
    fallback_on_error: bool,
}

impl LogFetcher {
    /// Create a fetcher from the `[source]` configuration section
    pub fn new(cfg: &SourceConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            url: cfg.endpoint.clone(),
            policy: RetryPolicy::from(cfg),
            fallback_on_error: cfg.fallback_on_error,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn fallback_on_error(&self) -> bool {
        self.fallback_on_error
    }

    /// Fetch logs
    ///
    /// In fallback mode the first failed attempt resolves to the sample
    /// dataset and no retry is made. In strict mode failures are retried per
    /// policy.
    ///
    /// # Errors
    /// Only in strict mode: the last attempt's error once retries run out.
    pub async fn fetch(&self) -> Result<FetchOutcome, FetchError> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            tracing::debug!(url = %self.url, attempt, "Fetching logs");

            let error = match self.fetch_once().await {
                Ok(records) => {
                    tracing::info!(attempt, records = records.len(), "Fetched logs");
                    return Ok(FetchOutcome::remote(records));
                }
                Err(e) => e,
            };

            if self.fallback_on_error {
                tracing::warn!(
                    attempt,
                    kind = error.kind(),
                    error = %error,
                    "Log fetch failed, using sample data"
                );
                return Ok(FetchOutcome::sample());
            }

            if attempt <= self.policy.retries {
                let delay = self.policy.delay_for(attempt);
                tracing::warn!(
                    attempt,
                    kind = error.kind(),
                    error = %error,
                    delay_ms = delay.as_millis() as u64,
                    "Log fetch failed, retrying"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            tracing::error!(attempts = attempt, error = %error, "Log fetch failed");
            return Err(error);
        }
    }

    /// A single GET against the endpoint, no retry
    ///
    /// A JSON `null` body is treated as an empty collection.
    pub async fn fetch_once(&self) -> Result<Vec<LogRecord>, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Log endpoint returned non-success status");
            return Err(FetchError::HttpStatus(status));
        }

        let body = response.bytes().await?;
        tracing::trace!(payload = %String::from_utf8_lossy(&body), "Raw log payload");
        tracing::debug!(bytes = body.len(), "Received log payload");

        let records: Option<Vec<LogRecord>> = serde_json::from_slice(&body)?;
        Ok(records.unwrap_or_default())
    }
}
