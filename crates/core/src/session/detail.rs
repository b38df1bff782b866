//! Recipe detail view session.

use tracing::{debug, warn};

use crate::client::{FeedbackSubmission, RecipeDetail, RecipeId, RecipeService, RequestError};

use super::{FeedbackState, FeedbackWorkflow, LoadStatus, Redirector, SessionId};

/// State of one visit to a recipe's detail view.
///
/// A new visit (even to the same recipe) is a new session; nothing is cached.
#[derive(Debug)]
pub struct RecipeDetailSession {
    id: SessionId,
    recipe_id: RecipeId,
    origin_query: String,
    status: LoadStatus<RecipeDetail>,
    load_started: bool,
    feedback: FeedbackWorkflow,
    closed: bool,
}

impl RecipeDetailSession {
    /// `origin_query` is the search text the user came from (may be empty).
    pub fn new(recipe_id: RecipeId, origin_query: impl Into<String>, redirector: Redirector) -> Self {
        let id = SessionId::new();
        let origin_query = origin_query.into();
        let feedback =
            FeedbackWorkflow::new(id, recipe_id.clone(), origin_query.clone(), redirector);

        Self {
            id,
            recipe_id,
            origin_query,
            status: LoadStatus::Loading,
            load_started: false,
            feedback,
            closed: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn recipe_id(&self) -> &RecipeId {
        &self.recipe_id
    }

    pub fn origin_query(&self) -> &str {
        &self.origin_query
    }

    pub fn status(&self) -> &LoadStatus<RecipeDetail> {
        &self.status
    }

    /// The recipe, once loaded. Never partially populated.
    pub fn detail(&self) -> Option<&RecipeDetail> {
        self.status.loaded()
    }

    pub fn load_error(&self) -> bool {
        matches!(self.status, LoadStatus::Failed(_))
    }

    pub fn feedback(&self) -> &FeedbackWorkflow {
        &self.feedback
    }

    /// Claim the single load of this session.
    pub fn begin_load(&mut self) -> Option<RecipeId> {
        if self.closed || self.load_started {
            return None;
        }
        self.load_started = true;
        debug!(session = %self.id, recipe_id = %self.recipe_id, "Loading recipe");
        Some(self.recipe_id.clone())
    }

    pub fn complete_load(
        &mut self,
        session: SessionId,
        result: Result<RecipeDetail, RequestError>,
    ) -> bool {
        if self.closed || session != self.id || !self.status.is_loading() {
            debug!(session = %session, "Discarding stale recipe load");
            return false;
        }

        self.status = match result {
            Ok(detail) => LoadStatus::Loaded(detail),
            Err(e) => {
                warn!(session = %self.id, recipe_id = %self.recipe_id, error = %e, "Recipe load failed");
                LoadStatus::Failed(e)
            }
        };
        true
    }

    pub async fn load(&mut self, service: &dyn RecipeService) -> bool {
        let Some(recipe_id) = self.begin_load() else {
            return false;
        };
        let result = service.recipe(&recipe_id).await;
        self.complete_load(self.id, result)
    }

    /// Start a feedback submission. Only possible once the recipe is shown.
    pub fn choose_feedback(&mut self, helpful: bool) -> Option<FeedbackSubmission> {
        if self.closed || self.detail().is_none() {
            return None;
        }
        self.feedback.choose(helpful)
    }

    pub fn complete_feedback(&mut self, session: SessionId, result: Result<(), RequestError>) -> bool {
        if self.closed || session != self.id {
            debug!(session = %session, "Discarding stale feedback outcome");
            return false;
        }
        self.feedback.complete(result)
    }

    /// Choose, submit and confirm feedback in one step.
    pub async fn send_feedback(&mut self, helpful: bool, service: &dyn RecipeService) -> FeedbackState {
        if let Some(submission) = self.choose_feedback(helpful) {
            let result = service.submit_feedback(&submission).await;
            self.complete_feedback(self.id, result);
        }
        self.feedback.state()
    }

    /// Tear the session down: pending redirect cancelled, late outcomes ignored.
    pub fn close(&mut self) {
        self.closed = true;
        self.feedback.teardown();
    }
}
