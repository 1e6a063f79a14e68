use reqwest::header::{CACHE_CONTROL, CONTENT_LANGUAGE, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Error, Debug)]
pub enum SenderError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Default)]
pub struct ClientStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
}

#[derive(Debug, Default)]
struct StatsInner {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
}

/// HTTP transport for composed batches.
///
/// One synchronous round trip per delivery cycle: POST the payload, read
/// the full response body as text. No status-code branching — the remote
/// on/off protocol lives entirely in the body, and anything short of a
/// transport fault counts as a delivered batch.
#[derive(Debug, Clone)]
pub struct LogClient {
    client: Client,
    endpoint: Url,
    stats: Arc<StatsInner>,
}

impl LogClient {
    pub fn new(endpoint: &str, timeout: Duration, user_agent: &str) -> Result<Self, SenderError> {
        let endpoint: Url = endpoint
            .parse()
            .map_err(|e| SenderError::InvalidConfiguration(format!("Invalid endpoint URL: {e}")))?;

        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                SenderError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint,
            stats: Arc::new(StatsInner::default()),
        })
    }

    /// Sends one batch payload and returns the response body text.
    ///
    /// A transport fault anywhere in the round trip (connect, send, body
    /// read, timeout) surfaces as `SenderError::NetworkError`; the caller
    /// owns the at-most-once policy for the entries it drained.
    pub async fn post_batch(&self, payload: String) -> Result<String, SenderError> {
        self.stats.total_requests.fetch_add(1, Ordering::Relaxed);

        let result = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, payload.len())
            .header(CONTENT_LANGUAGE, "en-US")
            .header(CACHE_CONTROL, "no-cache")
            .body(payload)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.stats.failed_requests.fetch_add(1, Ordering::Relaxed);
                return Err(e.into());
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                self.stats.failed_requests.fetch_add(1, Ordering::Relaxed);
                return Err(e.into());
            }
        };

        self.stats
            .successful_requests
            .fetch_add(1, Ordering::Relaxed);
        debug!(status = status.as_u16(), body_len = body.len(), "batch posted");
        Ok(body)
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    pub fn stats(&self) -> ClientStats {
        ClientStats {
            total_requests: self.stats.total_requests.load(Ordering::Relaxed),
            successful_requests: self.stats.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.stats.failed_requests.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_endpoint_urls() {
        let result = LogClient::new("not a url", Duration::from_secs(1), "test/0.1");
        assert!(matches!(
            result,
            Err(SenderError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn keeps_the_configured_endpoint() {
        let client =
            LogClient::new("https://www.echolog.io/logs", Duration::from_secs(1), "test/0.1")
                .unwrap();
        assert_eq!(client.endpoint(), "https://www.echolog.io/logs");
    }
}
