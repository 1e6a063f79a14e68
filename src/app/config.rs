use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Production collection endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.echolog.io/logs";

/// Short interval between delivery attempts while logging is enabled.
const SEND_INTERVAL: Duration = Duration::from_secs(15);

/// Long interval between re-checks while the server has logging disabled.
const DISABLED_POLL_INTERVAL: Duration = Duration::from_secs(30 * 60);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Tunables for one logger instance.
///
/// The two intervals implement a fixed dual-rate poll, not backoff:
/// transport failures never change the cadence, only the server's explicit
/// on/off instruction does.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub send_interval: Duration,
    pub disabled_poll_interval: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            send_interval: SEND_INTERVAL,
            disabled_poll_interval: DISABLED_POLL_INTERVAL,
            request_timeout: REQUEST_TIMEOUT,
            user_agent: format!("echolog/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url: Url = self
            .endpoint
            .parse()
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {e}", self.endpoint)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        if self.send_interval.is_zero() {
            return Err(ConfigError::InvalidConfig(
                "send_interval must be non-zero".to_string(),
            ));
        }
        if self.disabled_poll_interval.is_zero() {
            return Err(ConfigError::InvalidConfig(
                "disabled_poll_interval must be non-zero".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidConfig(
                "request_timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}
