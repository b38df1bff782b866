//! Mock recommendation service for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::client::{
    FeedbackSubmission, LeaderboardEntry, Query, RecipeDetail, RecipeId, RecipeService,
    RecipeSummary, RequestError,
};

/// A recorded service call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Search(Query),
    Recipe(RecipeId),
    Feedback(FeedbackSubmission),
    TopFeedback,
}

/// Mock implementation of the RecipeService trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable search results, recipes and leaderboard
/// - Track every call for assertions
/// - Simulate failures and latency
///
/// # Example
///
/// ```rust,ignore
/// use leftover_core::testing::{MockRecipeService, fixtures};
///
/// let service = MockRecipeService::new();
/// service.set_search_results(vec![fixtures::egg_rice_summary()]).await;
///
/// let results = service.search(&Query::new("egg", false)).await?;
/// assert_eq!(results.len(), 1);
/// assert_eq!(service.call_count().await, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRecipeService {
    /// Results returned for every search.
    search_results: Arc<RwLock<Vec<RecipeSummary>>>,
    /// Recipes by id; unknown ids answer HTTP 404.
    recipes: Arc<RwLock<HashMap<RecipeId, RecipeDetail>>>,
    /// Leaderboard returned by top_feedback.
    leaderboard: Arc<RwLock<Vec<LeaderboardEntry>>>,
    /// Recorded calls, in order.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<RequestError>>>,
    /// Simulated response latency.
    latency: Arc<RwLock<Option<Duration>>>,
}

impl MockRecipeService {
    /// Create a new mock service with no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the results to return for subsequent searches.
    pub async fn set_search_results(&self, results: Vec<RecipeSummary>) {
        *self.search_results.write().await = results;
    }

    /// Make a recipe available to `recipe()`.
    pub async fn add_recipe(&self, recipe: RecipeDetail) {
        self.recipes.write().await.insert(recipe.id.clone(), recipe);
    }

    pub async fn set_leaderboard(&self, entries: Vec<LeaderboardEntry>) {
        *self.leaderboard.write().await = entries;
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: RequestError) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay every response by `latency`.
    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = Some(latency);
    }

    /// Get recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Get the number of calls performed.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Feedback submissions received, in order.
    pub async fn recorded_feedback(&self) -> Vec<FeedbackSubmission> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Feedback(submission) => Some(submission.clone()),
                _ => None,
            })
            .collect()
    }

    /// Record the call, then apply latency and any injected error.
    async fn begin_call(&self, call: RecordedCall) -> Result<(), RequestError> {
        self.calls.write().await.push(call);

        let latency = *self.latency.read().await;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecipeService for MockRecipeService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, query: &Query) -> Result<Vec<RecipeSummary>, RequestError> {
        self.begin_call(RecordedCall::Search(query.clone())).await?;
        Ok(self.search_results.read().await.clone())
    }

    async fn recipe(&self, id: &RecipeId) -> Result<RecipeDetail, RequestError> {
        self.begin_call(RecordedCall::Recipe(id.clone())).await?;
        self.recipes
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RequestError::ServerError {
                status: 404,
                body: format!("recipe {} not found", id),
            })
    }

    async fn submit_feedback(&self, submission: &FeedbackSubmission) -> Result<(), RequestError> {
        self.begin_call(RecordedCall::Feedback(submission.clone()))
            .await
    }

    async fn top_feedback(&self) -> Result<Vec<LeaderboardEntry>, RequestError> {
        self.begin_call(RecordedCall::TopFeedback).await?;
        Ok(self.leaderboard.read().await.clone())
    }
}
