//! Shared HTTP client for ranking backend requests.
//!
//! Provides a configured [`reqwest::Client`] with the timeout and
//! User-Agent taken from [`ClientConfig`].

use crate::config::ClientConfig;
use crate::error::ClientError;
use std::time::Duration;

/// User-Agent sent when the config does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("eduranker-client/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for the ranking backend.
///
/// # Errors
///
/// Returns [`ClientError::Http`] if the client cannot be constructed.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, ClientError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .build()
        .map_err(|e| ClientError::Http(format!("failed to build HTTP client: {e}")))
}
