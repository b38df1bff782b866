//! Testing utilities and mock implementations.
//!
//! This module provides a mock recommendation service and data fixtures,
//! allowing sessions and the navigator to be tested without a real service.
//!
//! # Example
//!
//! ```rust,ignore
//! use leftover_core::testing::{fixtures, MockRecipeService};
//!
//! let service = MockRecipeService::new();
//! service.set_search_results(vec![fixtures::egg_rice_summary()]).await;
//! service.add_recipe(fixtures::egg_rice_detail()).await;
//!
//! // Hand it to a Navigator as Arc<dyn RecipeService>...
//! ```

mod mock_service;

pub use mock_service::{MockRecipeService, RecordedCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::client::{LeaderboardEntry, RecipeDetail, RecipeId, RecipeSummary};

    /// Create a search result row with reasonable defaults.
    pub fn summary(id: u64, name: &str, calories: f64) -> RecipeSummary {
        RecipeSummary {
            id: RecipeId::from(id),
            name: name.to_string(),
            calories: Some(calories),
            minutes: Some(15),
            n_ingredients: Some(4),
            score: None,
        }
    }

    /// `{id: 1, name: "Egg Rice", calories: 320, minutes: 10, n_ingredients: 3}`
    pub fn egg_rice_summary() -> RecipeSummary {
        RecipeSummary {
            id: RecipeId::from(1),
            name: "Egg Rice".to_string(),
            calories: Some(320.0),
            minutes: Some(10),
            n_ingredients: Some(3),
            score: None,
        }
    }

    /// Detail for recipe 1 with two ingredients and two steps.
    pub fn egg_rice_detail() -> RecipeDetail {
        RecipeDetail {
            id: RecipeId::from(1),
            name: "Egg Rice".to_string(),
            calories: None,
            minutes: None,
            n_ingredients: None,
            ingredients_list: vec!["egg".to_string(), "rice".to_string()],
            steps_list: vec!["boil".to_string(), "mix".to_string()],
        }
    }

    pub fn recipe_detail(id: u64, name: &str, ingredients: &[&str], steps: &[&str]) -> RecipeDetail {
        RecipeDetail {
            id: RecipeId::from(id),
            name: name.to_string(),
            calories: Some(400.0),
            minutes: Some(20),
            n_ingredients: Some(ingredients.len() as u32),
            ingredients_list: ingredients.iter().map(|s| s.to_string()).collect(),
            steps_list: steps.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn leaderboard_entry(id: u64, name: &str, feedback_count: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            id: RecipeId::from(id),
            name: name.to_string(),
            calories: Some(350.0),
            minutes: None,
            n_ingredients: None,
            feedback_count,
        }
    }
}
