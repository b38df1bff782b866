//! Helpful/not-helpful feedback on a recipe.
//!
//! `Unanswered -> Submitting -> Confirmed` is the only path. The choice is
//! recorded as soon as the user clicks; the submission outcome never blocks
//! the confirmation. Entering `Confirmed` schedules exactly one redirect home.

use tracing::{debug, info, warn};

use crate::client::{FeedbackSubmission, RecipeId, RequestError};

use super::{Redirector, ScheduledRedirect, SessionId};

/// Notice shown once feedback is confirmed.
pub const CONFIRMATION_NOTICE: &str = "Thank you for your feedback!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackState {
    Unanswered,
    Submitting { helpful: bool },
    /// Terminal. `delivered` is false when the submission failed.
    Confirmed { helpful: bool, delivered: bool },
}

impl FeedbackState {
    /// The user's choice, once made.
    pub fn choice(&self) -> Option<bool> {
        match *self {
            Self::Unanswered => None,
            Self::Submitting { helpful } | Self::Confirmed { helpful, .. } => Some(helpful),
        }
    }
}

/// Feedback state for one recipe detail session.
#[derive(Debug)]
pub struct FeedbackWorkflow {
    session: SessionId,
    recipe_id: RecipeId,
    query: String,
    state: FeedbackState,
    redirector: Redirector,
    redirect: Option<ScheduledRedirect>,
    torn_down: bool,
}

impl FeedbackWorkflow {
    pub fn new(
        session: SessionId,
        recipe_id: RecipeId,
        query: impl Into<String>,
        redirector: Redirector,
    ) -> Self {
        Self {
            session,
            recipe_id,
            query: query.into(),
            state: FeedbackState::Unanswered,
            redirector,
            redirect: None,
            torn_down: false,
        }
    }

    pub fn state(&self) -> FeedbackState {
        self.state
    }

    /// Transient confirmation notice, present only while `Confirmed`.
    pub fn notice(&self) -> Option<&'static str> {
        match self.state {
            FeedbackState::Confirmed { .. } if !self.torn_down => Some(CONFIRMATION_NOTICE),
            _ => None,
        }
    }

    pub fn redirect_pending(&self) -> bool {
        self.redirect.as_ref().is_some_and(|r| !r.is_finished())
    }

    /// Record the user's choice and produce the submission to send.
    ///
    /// Only legal from `Unanswered`; repeated clicks produce nothing.
    pub fn choose(&mut self, helpful: bool) -> Option<FeedbackSubmission> {
        if self.torn_down || self.state != FeedbackState::Unanswered {
            debug!(session = %self.session, "Ignoring repeated feedback click");
            return None;
        }

        self.state = FeedbackState::Submitting { helpful };

        Some(FeedbackSubmission {
            recipe_id: self.recipe_id.clone(),
            query: self.query.clone(),
            helpful,
        })
    }

    /// Apply the submission outcome and move to `Confirmed`.
    ///
    /// Failures are logged and recorded but still confirm. Returns `false`
    /// if there was no submission in flight.
    pub fn complete(&mut self, result: Result<(), RequestError>) -> bool {
        let FeedbackState::Submitting { helpful } = self.state else {
            return false;
        };
        if self.torn_down {
            return false;
        }

        let delivered = match result {
            Ok(()) => {
                info!(session = %self.session, recipe_id = %self.recipe_id, helpful, "Feedback recorded");
                true
            }
            Err(e) => {
                warn!(
                    session = %self.session,
                    recipe_id = %self.recipe_id,
                    error = %e,
                    "Feedback submission failed, confirming anyway"
                );
                false
            }
        };

        self.state = FeedbackState::Confirmed { helpful, delivered };
        self.redirect = Some(self.redirector.schedule(self.session));
        true
    }

    /// Cancel any pending redirect. The workflow accepts nothing afterwards.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        if let Some(redirect) = self.redirect.take() {
            redirect.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionEvent;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    fn workflow(query: &str) -> (FeedbackWorkflow, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let redirector = Redirector::new(Duration::from_millis(1500), tx);
        let workflow = FeedbackWorkflow::new(SessionId::new(), RecipeId::from(1), query, redirector);
        (workflow, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_choice_is_recorded_before_completion() {
        let (mut workflow, _rx) = workflow("");

        let submission = workflow.choose(true).unwrap();
        assert_eq!(workflow.state(), FeedbackState::Submitting { helpful: true });
        assert_eq!(workflow.state().choice(), Some(true));
        assert!(workflow.notice().is_none());

        assert_eq!(
            submission,
            FeedbackSubmission {
                recipe_id: RecipeId::from("1"),
                query: String::new(),
                helpful: true,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_clicks_produce_one_submission() {
        let (mut workflow, _rx) = workflow("egg");

        assert!(workflow.choose(false).is_some());
        assert!(workflow.choose(false).is_none());
        assert!(workflow.choose(true).is_none());
        assert_eq!(workflow.state(), FeedbackState::Submitting { helpful: false });

        workflow.complete(Ok(()));
        assert!(workflow.choose(true).is_none());
        assert_eq!(
            workflow.state(),
            FeedbackState::Confirmed {
                helpful: false,
                delivered: true
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_complete_without_choice_is_rejected() {
        let (mut workflow, _rx) = workflow("");
        assert!(!workflow.complete(Ok(())));
        assert_eq!(workflow.state(), FeedbackState::Unanswered);
        assert!(!workflow.redirect_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmed_is_terminal() {
        let (mut workflow, _rx) = workflow("");
        workflow.choose(true);
        assert!(workflow.complete(Ok(())));
        assert!(!workflow.complete(Ok(())));
        assert!(!workflow.complete(Err(RequestError::NetworkFailure("late".into()))));
        assert_eq!(
            workflow.state(),
            FeedbackState::Confirmed {
                helpful: true,
                delivered: true
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_still_confirms_and_redirects() {
        let (mut workflow, mut rx) = workflow("egg");
        workflow.choose(true);

        let start = Instant::now();
        assert!(workflow.complete(Err(RequestError::ServerError {
            status: 500,
            body: String::new(),
        })));
        assert_eq!(
            workflow.state(),
            FeedbackState::Confirmed {
                helpful: true,
                delivered: false
            }
        );
        assert_eq!(workflow.notice(), Some(CONFIRMATION_NOTICE));
        assert!(workflow.redirect_pending());

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, SessionEvent::RedirectDue { .. }));
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_redirect() {
        let (mut workflow, mut rx) = workflow("");
        workflow.choose(true);
        workflow.complete(Ok(()));
        assert!(workflow.redirect_pending());

        tokio::time::sleep(Duration::from_millis(1000)).await;
        workflow.teardown();
        assert!(workflow.notice().is_none());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_before_completion_discards_outcome() {
        let (mut workflow, mut rx) = workflow("");
        workflow.choose(true);
        workflow.teardown();

        assert!(!workflow.complete(Ok(())));
        assert_eq!(workflow.state(), FeedbackState::Submitting { helpful: true });

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}
