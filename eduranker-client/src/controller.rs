//! Search lifecycle state machine.
//!
//! [`SearchController`] owns the single [`SearchState`] of a session and
//! mutates it through four transitions: begin search, finish search (success
//! or failure) and toggle vote. It performs no I/O; the caller dispatches the
//! network calls the transitions ask for.
//!
//! # Transitions
//!
//! ```text
//!             begin_search(q)                 finish_search(gen, Ok)
//!  ┌──────┐  (q non-empty)   ┌─────────┐  ─────────────────────────► results set
//!  │ idle ├─────────────────►│ pending │
//!  └──────┘                  └─────────┘  ─────────────────────────► alert set
//!     ▲  toggle(pos, label)       │         finish_search(gen, Err)
//!     └───────────────────────────┘
//! ```
//!
//! Every accepted search bumps `generation`. A completion for an older
//! generation is stale and leaves the state untouched.

use crate::error::ClientError;
use crate::types::{FeedbackLabel, FeedbackRequest, RankedResult, SearchRequest};
use std::collections::BTreeMap;

/// Per-position vote state. A position is present only while a vote is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackToggles {
    active: BTreeMap<usize, FeedbackLabel>,
}

/// What a toggle did to a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEffect {
    /// The label became active, replacing `previous` if there was one.
    Activated {
        /// Label that was active before, if any.
        previous: Option<FeedbackLabel>,
    },
    /// The same label was already active and has been retracted.
    Deactivated,
}

impl FeedbackToggles {
    /// Active label for `position`, if any.
    pub fn get(&self, position: usize) -> Option<FeedbackLabel> {
        self.active.get(&position).copied()
    }

    /// Toggle `label` on `position`.
    pub fn toggle(&mut self, position: usize, label: FeedbackLabel) -> ToggleEffect {
        if self.get(position) == Some(label) {
            self.active.remove(&position);
            ToggleEffect::Deactivated
        } else {
            let previous = self.active.insert(position, label);
            ToggleEffect::Activated { previous }
        }
    }

    /// Drop every vote.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Everything a renderer needs to draw the search page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Text of the last accepted submission.
    pub question: Option<String>,
    /// Results of the most recent successful search, in rank order.
    pub results: Vec<RankedResult>,
    /// A search is in flight; submission should be disabled.
    pub pending: bool,
    /// Sticky: at least one non-empty question has been submitted.
    pub has_searched: bool,
    /// Active votes, keyed by position in `results`.
    pub votes: FeedbackToggles,
    /// Message of the last failed search, cleared by the next submission.
    pub alert: Option<String>,
    /// Token of the latest accepted search.
    pub generation: u64,
}

/// A search the controller has accepted and wants dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    /// Generation to hand back to [`SearchController::finish_search`].
    pub generation: u64,
    /// Body to post to the search endpoint.
    pub request: SearchRequest,
}

/// How a search completion was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Results replaced the store.
    Applied(Vec<RankedResult>),
    /// The search failed; the message is in `SearchState::alert`.
    Failed(ClientError),
    /// A newer search was started after this one; nothing changed.
    Stale,
}

/// Result of a vote toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct Toggled {
    /// Label active on the position after the toggle.
    pub active: Option<FeedbackLabel>,
    /// Feedback to send, present only when a label was activated.
    pub feedback: Option<FeedbackRequest>,
}

/// Owner of the session state.
#[derive(Debug, Default)]
pub struct SearchController {
    state: SearchState,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Accept a new question.
    ///
    /// Returns `None` without touching the state when `question` is empty or
    /// whitespace. Otherwise clears results, votes and any alert, marks the
    /// session pending and returns the ticket to dispatch.
    pub fn begin_search(&mut self, question: &str) -> Option<SearchTicket> {
        if question.trim().is_empty() {
            return None;
        }

        self.state.results.clear();
        self.state.votes.clear();
        self.state.alert = None;
        self.state.pending = true;
        self.state.has_searched = true;
        self.state.question = Some(question.to_owned());
        self.state.generation += 1;

        tracing::trace!(question, generation = self.state.generation, "search accepted");

        Some(SearchTicket {
            generation: self.state.generation,
            request: SearchRequest::new(question),
        })
    }

    /// Apply the outcome of the search started with `generation`.
    pub fn finish_search(
        &mut self,
        generation: u64,
        outcome: Result<Vec<RankedResult>, ClientError>,
    ) -> Completion {
        if generation != self.state.generation {
            tracing::debug!(
                generation,
                latest = self.state.generation,
                "discarding superseded search response"
            );
            return Completion::Stale;
        }

        self.state.pending = false;
        match outcome {
            Ok(results) => {
                tracing::debug!(generation, count = results.len(), "search applied");
                self.state.results = results.clone();
                self.state.votes.clear();
                Completion::Applied(results)
            }
            Err(err) => {
                tracing::warn!(generation, error = %err, "search failed");
                self.state.results.clear();
                self.state.alert = Some(err.to_string());
                Completion::Failed(err)
            }
        }
    }

    /// Toggle `label` on the result at `position`.
    ///
    /// Activation yields a [`FeedbackRequest`] for the caller to send;
    /// retraction yields none and is never reported to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidPosition`] if no result exists at
    /// `position`. The state is unchanged in that case.
    pub fn toggle(&mut self, position: usize, label: FeedbackLabel) -> Result<Toggled, ClientError> {
        let len = self.state.results.len();
        let Some(result) = self.state.results.get(position) else {
            return Err(ClientError::InvalidPosition { position, len });
        };

        let toggled = match self.state.votes.toggle(position, label) {
            ToggleEffect::Deactivated => {
                tracing::trace!(position, %label, "vote retracted");
                Toggled {
                    active: None,
                    feedback: None,
                }
            }
            ToggleEffect::Activated { previous } => {
                tracing::trace!(position, %label, ?previous, "vote recorded");
                Toggled {
                    active: Some(label),
                    feedback: Some(FeedbackRequest::for_result(result, label)),
                }
            }
        };
        Ok(toggled)
    }
}
