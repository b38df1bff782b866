//! HTTP implementation of the recommendation service client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ServiceConfig;

use super::types::{
    RecipeResponse, SearchRequest, SearchResponse, TopFeedbackResponse,
};
use super::{
    ClientError, Endpoint, FeedbackSubmission, LeaderboardEntry, Query, RecipeDetail, RecipeId,
    RecipeService, RecipeSummary, RequestError,
};

/// How much of an error body is kept for diagnostics.
const ERROR_BODY_EXCERPT: usize = 200;

/// Recommendation service client over HTTP/JSON.
pub struct HttpRecipeClient {
    client: Client,
    base_url: String,
}

impl HttpRecipeClient {
    /// Create a new client with the configured base URL and timeout.
    pub fn new(config: &ServiceConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(config.base_url.clone()));
        }

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Issue a request and return the decoded JSON body.
    ///
    /// `payload`, when present, is sent as the JSON request body.
    pub async fn send<P>(
        &self,
        endpoint: &Endpoint,
        payload: Option<&P>,
    ) -> Result<serde_json::Value, RequestError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let response = self.send_raw(endpoint, payload).await?;
        response
            .json()
            .await
            .map_err(|e| RequestError::DecodeFailure(format!("{}: {}", endpoint, e)))
    }

    /// Issue a request and decode the body into `T`.
    async fn send_as<T, P>(&self, endpoint: &Endpoint, payload: Option<&P>) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
        P: Serialize + Sync + ?Sized,
    {
        let value = self.send(endpoint, payload).await?;
        serde_json::from_value(value)
            .map_err(|e| RequestError::DecodeFailure(format!("{}: {}", endpoint, e)))
    }

    async fn send_raw<P>(
        &self,
        endpoint: &Endpoint,
        payload: Option<&P>,
    ) -> Result<Response, RequestError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let mut request = self.client.request(endpoint.method(), self.url(endpoint));
        if let Some(body) = payload {
            request = request.json(body);
        }

        debug!(endpoint = %endpoint, "Sending request");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RequestError::NetworkFailure(format!("{}: request timed out", endpoint))
            } else if e.is_builder() {
                RequestError::NetworkFailure(format!("{}: invalid request: {}", endpoint, e))
            } else {
                RequestError::NetworkFailure(format!("{}: {}", endpoint, e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(endpoint = %endpoint, status = status.as_u16(), "Request rejected");
            return Err(RequestError::ServerError {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_EXCERPT).collect(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl RecipeService for HttpRecipeClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn search(&self, query: &Query) -> Result<Vec<RecipeSummary>, RequestError> {
        let body = SearchRequest::from(query);
        let response: SearchResponse = self.send_as(&Endpoint::Search, Some(&body)).await?;

        debug!(
            query = %query.text,
            healthy = query.healthy_only,
            results = response.results.len(),
            "Search complete"
        );

        Ok(response.results)
    }

    async fn recipe(&self, id: &RecipeId) -> Result<RecipeDetail, RequestError> {
        let response: RecipeResponse = self
            .send_as::<_, ()>(&Endpoint::Recipe(id.clone()), None)
            .await?;
        Ok(response.recipe)
    }

    async fn submit_feedback(&self, submission: &FeedbackSubmission) -> Result<(), RequestError> {
        let response = self.send_raw(&Endpoint::Feedback, Some(submission)).await?;

        // Drain the acknowledgement so the connection can be reused.
        let ack = response.text().await.unwrap_or_default();
        debug!(
            recipe_id = %submission.recipe_id,
            helpful = submission.helpful,
            ack = %ack.trim(),
            "Feedback accepted"
        );

        Ok(())
    }

    async fn top_feedback(&self) -> Result<Vec<LeaderboardEntry>, RequestError> {
        let response: TopFeedbackResponse =
            self.send_as::<_, ()>(&Endpoint::TopFeedback, None).await?;
        Ok(response.recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> HttpRecipeClient {
        HttpRecipeClient::new(&ServiceConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = client("http://127.0.0.1:5000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
        assert_eq!(
            client.url(&Endpoint::TopFeedback),
            "http://127.0.0.1:5000/top-feedback"
        );
    }

    #[test]
    fn test_construction_rejects_unusable_url() {
        for base_url in ["", "   ", "127.0.0.1:5000", "ftp://recipes.local"] {
            let result = HttpRecipeClient::new(&ServiceConfig {
                base_url: base_url.to_string(),
                timeout_secs: 5,
            });
            assert!(
                matches!(result, Err(ClientError::InvalidBaseUrl(_))),
                "accepted {:?}",
                base_url
            );
        }
    }

    #[test]
    fn test_recipe_url() {
        let client = client("http://recipes.local:8000");
        assert_eq!(
            client.url(&Endpoint::Recipe(RecipeId::from(12))),
            "http://recipes.local:8000/recipe/12"
        );
    }
}
