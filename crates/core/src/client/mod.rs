//! Recommendation service client.
//!
//! This module provides a `RecipeService` trait over the four requests the
//! recommendation service understands, plus the HTTP implementation.

mod http;
mod types;

pub use http::HttpRecipeClient;
pub use types::*;

use async_trait::async_trait;
use reqwest::Method;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when talking to the recommendation service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The request never reached the service or no response came back.
    #[error("Recommendation service unreachable: {0}")]
    NetworkFailure(String),

    /// The response body did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    DecodeFailure(String),

    /// The service answered with a non-success status.
    #[error("Recommendation service returned HTTP {status}")]
    ServerError { status: u16, body: String },
}

/// Errors constructing a client. No request has been sent.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid recommendation service URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

impl RequestError {
    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Requests understood by the recommendation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Recipe(RecipeId),
    Feedback,
    TopFeedback,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Self::Search | Self::Feedback => Method::POST,
            Self::Recipe(_) | Self::TopFeedback => Method::GET,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Search => "/search".to_string(),
            Self::Recipe(id) => format!("/recipe/{}", urlencoding::encode(id.as_str())),
            Self::Feedback => "/feedback".to_string(),
            Self::TopFeedback => "/top-feedback".to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// Trait for recommendation service backends.
#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Ranked recipes for the query, in service order.
    async fn search(&self, query: &Query) -> Result<Vec<RecipeSummary>, RequestError>;

    /// Full detail of a single recipe.
    async fn recipe(&self, id: &RecipeId) -> Result<RecipeDetail, RequestError>;

    /// Record a helpful/not-helpful vote. The acknowledgement is not consumed.
    async fn submit_feedback(&self, submission: &FeedbackSubmission) -> Result<(), RequestError>;

    /// Recipes with the most helpful votes, in service order.
    async fn top_feedback(&self) -> Result<Vec<LeaderboardEntry>, RequestError>;
}
