//! Wire types for the recommendation service.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Recipe identifier.
///
/// The service emits ids as JSON numbers, while the id travels through
/// navigation as text and goes back to `/feedback` as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for RecipeId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self(id.trim().to_string())
    }
}

impl Serialize for RecipeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Unsigned(n) => Self::from(n),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Text(s) => Self::from(s.as_str()),
        })
    }
}

/// User-entered search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Free-text ingredient list (e.g., "chicken, rice, egg").
    pub text: String,
    /// Restrict results to the service's "healthy" subset.
    pub healthy_only: bool,
}

impl Query {
    pub fn new(text: impl Into<String>, healthy_only: bool) -> Self {
        Self {
            text: text.into(),
            healthy_only,
        }
    }

    /// Only empty text is held back. Whitespace is sent as typed and the
    /// service answers it with no results.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Body of `POST /search`.
#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub query: &'a str,
    pub healthy: bool,
}

impl<'a> From<&'a Query> for SearchRequest<'a> {
    fn from(query: &'a Query) -> Self {
        Self {
            query: &query.text,
            healthy: query.healthy_only,
        }
    }
}

/// One row of a search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub minutes: Option<u32>,
    #[serde(default)]
    pub n_ingredients: Option<u32>,
    /// Similarity score assigned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Response of `POST /search`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub results: Vec<RecipeSummary>,
}

/// Full recipe as returned by `GET /recipe/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_ingredients: Option<u32>,
    pub ingredients_list: Vec<String>,
    pub steps_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecipeResponse {
    pub recipe: RecipeDetail,
}

/// A helpful/not-helpful vote for one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackSubmission {
    pub recipe_id: RecipeId,
    /// Query text the user searched with before opening the recipe.
    pub query: String,
    /// Sent as `1` or `0`.
    #[serde(serialize_with = "serialize_flag")]
    pub helpful: bool,
}

fn serialize_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

/// One row of the "top recipes" leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_ingredients: Option<u32>,
    pub feedback_count: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopFeedbackResponse {
    pub recipes: Vec<LeaderboardEntry>,
}
