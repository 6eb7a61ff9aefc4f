//! # eduranker-client
//!
//! Client-side lifecycle controller for the EduRanker search front end.
//!
//! A user submits a natural-language question; the client forwards it to the
//! remote ranking backend, stores the ranked results and lets the user vote
//! like/dislike on each one. Votes are reported to the backend's feedback
//! endpoint, keyed by the result's inference identifier.
//!
//! ## Design
//!
//! - [`controller`]: the synchronous state machine owning all session state
//! - [`session`]: the async driver that feeds user commands and network
//!   completions to the controller and publishes state snapshots
//! - [`backend`]: the [`RankingBackend`] seam and its HTTP implementation
//! - [`display`]: pure normalization of results into renderable cards
//!
//! ## Behaviour
//!
//! - Empty questions are ignored without touching state
//! - A new question clears results and votes before the request is sent
//! - A response to a superseded question is discarded
//! - Feedback is fire-and-forget; failures are logged, never surfaced

pub mod backend;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod http;
pub mod session;
pub mod types;

pub use backend::{HttpBackend, RankingBackend};
pub use config::ClientConfig;
pub use controller::{SearchController, SearchState};
pub use display::{ResultCard, SourceBadge};
pub use error::{ClientError, Result};
pub use session::{Session, SessionHandle, SubmitOutcome};
pub use types::{FeedbackLabel, FeedbackRequest, RankedResult, SearchRequest};

/// Start a search session against the HTTP backend described by `config`.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// Returns [`ClientError::Config`] if `config` fails validation, or
/// [`ClientError::Http`] if the HTTP client cannot be built.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> eduranker_client::Result<()> {
/// let session = eduranker_client::connect(&eduranker_client::ClientConfig::default())?;
/// session.submit("what is a monad").await?;
/// for card in eduranker_client::display::cards(&session.snapshot()) {
///     println!("{} {}", card.score, card.title);
/// }
/// session.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub fn connect(config: &ClientConfig) -> Result<SessionHandle> {
    let backend = HttpBackend::new(config)?;
    Ok(Session::spawn(backend))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_validates_config_zero_timeout() {
        let config = ClientConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = connect(&config).unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn connect_validates_config_bad_url() {
        let err = connect(&ClientConfig::with_base_url("localhost")).unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[tokio::test]
    async fn connect_starts_idle_session() {
        let session = connect(&ClientConfig::default()).expect("valid config");
        let state = session.snapshot();
        assert!(!state.has_searched);
        assert!(!state.pending);
        session.shutdown().await;
    }
}
