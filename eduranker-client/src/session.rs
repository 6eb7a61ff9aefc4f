//! Async driver for a search session.
//!
//! A [`Session`] task owns the [`SearchController`] and is the only place the
//! state is mutated. User commands arrive over an unbounded channel from a
//! [`SessionHandle`]; search completions arrive on an internal channel. Each
//! message is handled to completion and then one snapshot is published on a
//! `watch` channel, so renderers never observe a half-applied transition.
//!
//! Search calls run on spawned tasks that post their outcome back to the
//! session. Replies to the handle are sent only after the snapshot is
//! published, so a caller that awaited a command always observes its effect.
//! Feedback calls are detached: they are tracked only so shutdown can
//! wait for them, and their outcome never reaches the state.

use crate::backend::RankingBackend;
use crate::controller::{Completion, SearchController, SearchState};
use crate::error::{ClientError, Result};
use crate::types::{FeedbackLabel, FeedbackRequest, RankedResult};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;

/// How a submission ended, from the submitter's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The question was empty; nothing was sent and nothing changed.
    Ignored,
    /// The search succeeded and these results are now displayed.
    Completed(Vec<RankedResult>),
    /// A newer submission was accepted before this one returned.
    Superseded,
}

enum Command {
    Submit {
        question: String,
        reply: oneshot::Sender<Result<SubmitOutcome>>,
    },
    Toggle {
        position: usize,
        label: FeedbackLabel,
        reply: oneshot::Sender<Result<Option<FeedbackLabel>>>,
    },
}

struct SearchDone {
    generation: u64,
    outcome: Result<Vec<RankedResult>>,
    reply: oneshot::Sender<Result<SubmitOutcome>>,
}

/// The session task. Construct it with [`Session::spawn`].
pub struct Session<B> {
    controller: SearchController,
    backend: Arc<B>,
    commands: mpsc::UnboundedReceiver<Command>,
    completions_tx: mpsc::UnboundedSender<SearchDone>,
    completions_rx: mpsc::UnboundedReceiver<SearchDone>,
    snapshots: watch::Sender<SearchState>,
    feedback: TaskTracker,
}

impl<B: RankingBackend + 'static> Session<B> {
    /// Start a session on the current tokio runtime.
    pub fn spawn(backend: B) -> SessionHandle {
        let (command_tx, commands) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (snapshots, snapshot_rx) = watch::channel(SearchState::default());
        let feedback = TaskTracker::new();

        let session = Self {
            controller: SearchController::new(),
            backend: Arc::new(backend),
            commands,
            completions_tx,
            completions_rx,
            snapshots,
            feedback: feedback.clone(),
        };
        let task = tokio::spawn(session.run());

        SessionHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            feedback,
            task,
        }
    }

    async fn run(mut self) {
        tracing::debug!("search session started");
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(done) = self.completions_rx.recv() => self.handle_completion(done),
            }
        }

        // In-flight searches are abandoned; their completions have nowhere to go.
        self.feedback.close();
        self.feedback.wait().await;
        tracing::debug!("search session stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Submit { question, reply } => {
                let Some(ticket) = self.controller.begin_search(&question) else {
                    let _ = reply.send(Ok(SubmitOutcome::Ignored));
                    return;
                };
                self.publish();
                let backend = Arc::clone(&self.backend);
                let done_tx = self.completions_tx.clone();
                tokio::spawn(async move {
                    let outcome = backend.search(&ticket.request).await;
                    let _ = done_tx.send(SearchDone {
                        generation: ticket.generation,
                        outcome,
                        reply,
                    });
                });
            }
            Command::Toggle {
                position,
                label,
                reply,
            } => {
                let toggled = self.controller.toggle(position, label).map(|toggled| {
                    if let Some(feedback) = toggled.feedback {
                        self.dispatch_feedback(feedback);
                    }
                    toggled.active
                });
                self.publish();
                let _ = reply.send(toggled);
            }
        }
    }

    fn handle_completion(&mut self, done: SearchDone) {
        let outcome = match self.controller.finish_search(done.generation, done.outcome) {
            Completion::Applied(results) => Ok(SubmitOutcome::Completed(results)),
            Completion::Failed(err) => Err(err),
            Completion::Stale => Ok(SubmitOutcome::Superseded),
        };
        self.publish();
        let _ = done.reply.send(outcome);
    }

    fn dispatch_feedback(&self, feedback: FeedbackRequest) {
        let backend = Arc::clone(&self.backend);
        self.feedback.spawn(async move {
            if let Err(e) = backend.send_feedback(&feedback).await {
                tracing::warn!(
                    error = %e,
                    label = %feedback.feedback_type,
                    "feedback not delivered"
                );
            }
        });
    }

    fn publish(&self) {
        let state = self.controller.state();
        self.snapshots.send_if_modified(|current| {
            if current == state {
                false
            } else {
                *current = state.clone();
                true
            }
        });
    }
}

/// Client side of a running [`Session`].
#[derive(Debug)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<SearchState>,
    feedback: TaskTracker,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Submit a question and wait for its search to finish.
    ///
    /// The state is cleared and marked pending before the request is sent.
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode error of a failed search (also
    /// recorded as the state's alert), or [`ClientError::SessionClosed`].
    pub async fn submit(&self, question: impl Into<String>) -> Result<SubmitOutcome> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Submit {
            question: question.into(),
            reply,
        })?;
        rx.await.map_err(|_| ClientError::SessionClosed)?
    }

    /// Toggle `label` on the result at `position` and return the label now
    /// active there.
    ///
    /// Feedback is sent in the background on activation; its failure is only
    /// logged. Each call runs as its own task, so two quick toggles are
    /// dispatched in order but may reach the backend in either order. Call
    /// [`flush_feedback`](Self::flush_feedback) between them when delivery
    /// order matters.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidPosition`] for a position outside the
    /// current results, or [`ClientError::SessionClosed`].
    pub async fn toggle(&self, position: usize, label: FeedbackLabel) -> Result<Option<FeedbackLabel>> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Toggle {
            position,
            label,
            reply,
        })?;
        rx.await.map_err(|_| ClientError::SessionClosed)?
    }

    /// Latest published state.
    pub fn snapshot(&self) -> SearchState {
        self.snapshots.borrow().clone()
    }

    /// A receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.snapshots.clone()
    }

    /// Wait until every feedback call dispatched so far has finished.
    pub async fn flush_feedback(&self) {
        self.feedback.close();
        self.feedback.wait().await;
        self.feedback.reopen();
    }

    /// Stop the session and wait for outstanding feedback calls.
    pub async fn shutdown(self) {
        drop(self.commands);
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "search session task failed");
        }
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| ClientError::SessionClosed)
    }
}
