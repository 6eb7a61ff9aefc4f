//! Client configuration with sensible defaults.
//!
//! [`ClientConfig`] controls where the ranking backend lives and how long
//! requests may take. The retrieval parameters sent with every question are
//! not configurable; see [`QueryParams`](crate::types::QueryParams).

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the ranking backend transport.
///
/// Use [`Default::default()`] for a backend running on the local machine, or
/// construct with field overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and port of the backend, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Path of the search workflow endpoint.
    pub search_path: String,
    /// Path of the feedback ingestion endpoint.
    pub feedback_path: String,
    /// Per-request HTTP timeout in seconds. Ranking runs are slow; keep this generous.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, `eduranker-client/<version>` is sent.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            search_path: "/api/workflow/process".into(),
            feedback_path: "/api/reranking/feedback".into(),
            timeout_seconds: 60,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at `base_url`, with default paths and timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` parses and uses `http` or `https`
    /// - `timeout_seconds` must be greater than 0
    /// - both endpoint paths start with `/`
    pub fn validate(&self) -> Result<(), ClientError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base_url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "base_url scheme must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(ClientError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if !self.search_path.starts_with('/') {
            return Err(ClientError::Config("search_path must start with '/'".into()));
        }
        if !self.feedback_path.starts_with('/') {
            return Err(ClientError::Config(
                "feedback_path must start with '/'".into(),
            ));
        }
        Ok(())
    }

    /// Full URL of the search endpoint.
    pub fn search_url(&self) -> Result<Url, ClientError> {
        self.endpoint(&self.search_path)
    }

    /// Full URL of the feedback endpoint.
    pub fn feedback_url(&self) -> Result<Url, ClientError> {
        self.endpoint(&self.feedback_path)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base_url: {e}")))?;
        // Absolute path: replaces whatever path the base carries.
        base.join(path)
            .map_err(|e| ClientError::Config(format!("invalid endpoint path {path}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.search_path, "/api/workflow/process");
        assert_eq!(config.feedback_path, "/api/reranking/feedback");
        assert_eq!(config.timeout_seconds, 60);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn endpoints_join_base_and_path() {
        let config = ClientConfig::with_base_url("http://ranker.local:9000");
        assert_eq!(
            config.search_url().unwrap().as_str(),
            "http://ranker.local:9000/api/workflow/process"
        );
        assert_eq!(
            config.feedback_url().unwrap().as_str(),
            "http://ranker.local:9000/api/reranking/feedback"
        );
    }

    #[test]
    fn unparsable_base_url_rejected() {
        let config = ClientConfig::with_base_url("not a url");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn non_http_scheme_rejected() {
        let config = ClientConfig::with_base_url("ftp://127.0.0.1");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scheme"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = ClientConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn relative_paths_rejected() {
        let config = ClientConfig {
            search_path: "api/workflow/process".into(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("search_path"));

        let config = ClientConfig {
            feedback_path: "feedback".into(),
            ..Default::default()
        };
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("feedback_path"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout_seconds": 5}"#).unwrap();
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
    }
}
