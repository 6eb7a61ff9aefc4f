//! Transport to the ranking backend.
//!
//! [`RankingBackend`] is the seam between the session and the network.
//! [`HttpBackend`] is the production implementation; tests substitute
//! scripted backends.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http;
use crate::types::{FeedbackRequest, RankedResult, SearchRequest, SearchResponse};
use url::Url;

/// The remote services a search session talks to.
///
/// Implementations must be `Send + Sync` so calls can run on spawned tasks.
pub trait RankingBackend: Send + Sync {
    /// Run a search workflow and return results in rank order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport failure,
    /// [`ClientError::Status`] on a non-success status and
    /// [`ClientError::Decode`] when a success body is not valid JSON.
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl std::future::Future<Output = Result<Vec<RankedResult>, ClientError>> + Send;

    /// Record a like/dislike vote. The response body is ignored.
    fn send_feedback(
        &self,
        feedback: &FeedbackRequest,
    ) -> impl std::future::Future<Output = Result<(), ClientError>> + Send;
}

/// JSON-over-HTTP backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    search_url: Url,
    feedback_url: Url,
}

impl HttpBackend {
    /// Build a backend from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if `config` is invalid, or
    /// [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self {
            client: http::build_client(config)?,
            search_url: config.search_url()?,
            feedback_url: config.feedback_url()?,
        })
    }

    /// The search endpoint this backend posts to.
    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// The feedback endpoint this backend posts to.
    pub fn feedback_url(&self) -> &Url {
        &self.feedback_url
    }
}

impl RankingBackend for HttpBackend {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RankedResult>, ClientError> {
        tracing::trace!(question = %request.question, "search request");

        let response = self
            .client
            .post(self.search_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Http(format!("search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "search rejected by backend");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Http(format!("search response read failed: {e}")))?;

        let results = parse_search_response(&bytes)?;
        tracing::debug!(count = results.len(), "search returned results");
        Ok(results)
    }

    async fn send_feedback(&self, feedback: &FeedbackRequest) -> Result<(), ClientError> {
        tracing::debug!(label = %feedback.feedback_type, "sending feedback");

        // Any response counts as delivered; only transport failures surface.
        self.client
            .post(self.feedback_url.clone())
            .json(feedback)
            .send()
            .await
            .map_err(|e| ClientError::Http(format!("feedback request failed: {e}")))?;
        Ok(())
    }
}

/// Decode a search success body.
///
/// Extracted as a separate function for testability without a server.
fn parse_search_response(body: &[u8]) -> Result<Vec<RankedResult>, ClientError> {
    serde_json::from_slice::<SearchResponse>(body)
        .map(SearchResponse::into_results)
        .map_err(|e| ClientError::Decode(format!("invalid search response: {e}")))
}
