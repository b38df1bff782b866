//! Plain-text rendering of session state.

use crate::client::{LeaderboardEntry, RecipeSummary};
use crate::navigator::ActiveSession;
use crate::session::{
    FeedbackState, LeaderboardSession, LoadStatus, RecipeDetailSession, SearchSession,
    SearchStatus,
};

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

fn count(value: Option<u32>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

/// One search result row.
pub fn render_summary(summary: &RecipeSummary) -> String {
    format!(
        "{} | {} calories | {} minutes | {} ingredients",
        summary.name,
        number(summary.calories),
        count(summary.minutes),
        count(summary.n_ingredients)
    )
}

pub fn render_leaderboard_entry(entry: &LeaderboardEntry) -> String {
    format!(
        "{} | Calories: {} | Likes: {}",
        entry.name,
        number(entry.calories),
        entry.feedback_count
    )
}

pub fn render_search(session: &SearchSession) -> Vec<String> {
    let query = session.query();
    let mut lines = vec![format!(
        "Ingredients: {}{}",
        if query.text.is_empty() { "(none)" } else { query.text.as_str() },
        if query.healthy_only { " [healthy only]" } else { "" }
    )];

    match session.status() {
        SearchStatus::Idle => {}
        SearchStatus::Searching => lines.push("Searching recipes...".to_string()),
        SearchStatus::Failed(e) => lines.push(format!("Search failed: {}", e)),
        SearchStatus::Ready if session.results().is_empty() => {
            lines.push("No recipes found.".to_string())
        }
        SearchStatus::Ready => {
            lines.extend(
                session
                    .results()
                    .iter()
                    .enumerate()
                    .map(|(i, r)| format!("{:>2}. {}", i + 1, render_summary(r))),
            );
        }
    }

    lines
}

pub fn render_detail(session: &RecipeDetailSession) -> Vec<String> {
    let detail = match session.status() {
        LoadStatus::Loading => return vec!["Loading recipe...".to_string()],
        LoadStatus::Failed(e) => {
            return vec![format!(
                "Could not load recipe {}: {}",
                session.recipe_id(),
                e
            )]
        }
        LoadStatus::Loaded(detail) => detail,
    };

    let mut lines = vec![
        detail.name.clone(),
        format!("{} calories", number(detail.calories)),
        String::new(),
        "Ingredients".to_string(),
    ];
    lines.extend(detail.ingredients_list.iter().map(|i| format!("  - {}", i)));
    lines.push(String::new());
    lines.push("Steps".to_string());
    lines.extend(
        detail
            .steps_list
            .iter()
            .enumerate()
            .map(|(n, s)| format!("  {}. {}", n + 1, s)),
    );
    lines.push(String::new());

    let feedback = session.feedback();
    match feedback.state() {
        FeedbackState::Unanswered => {
            lines.push("Was this recommendation helpful? [helpful / not-helpful]".to_string())
        }
        FeedbackState::Submitting { helpful } => {
            lines.push(format!("You chose: {}", vote(helpful)));
            lines.push("Saving feedback...".to_string());
        }
        FeedbackState::Confirmed { helpful, .. } => {
            lines.push(format!("You chose: {}", vote(helpful)));
        }
    }
    if let Some(notice) = feedback.notice() {
        lines.push(notice.to_string());
    }

    lines
}

fn vote(helpful: bool) -> &'static str {
    if helpful {
        "Helpful"
    } else {
        "Not Helpful"
    }
}

pub fn render_leaderboard(session: &LeaderboardSession) -> Vec<String> {
    let mut lines = vec!["Top Rated Recipes".to_string()];
    match session.status() {
        LoadStatus::Loading => lines.push("Loading...".to_string()),
        LoadStatus::Failed(e) => lines.push(format!("Could not load leaderboard: {}", e)),
        LoadStatus::Loaded(entries) if entries.is_empty() => {
            lines.push("No feedback yet.".to_string())
        }
        LoadStatus::Loaded(entries) => {
            lines.extend(
                entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| format!("{:>2}. {}", i + 1, render_leaderboard_entry(e))),
            );
        }
    }
    lines
}

/// Render whichever view is live.
pub fn render(session: &ActiveSession) -> Vec<String> {
    match session {
        ActiveSession::Search(s) => render_search(s),
        ActiveSession::Recipe(s) => render_detail(s),
        ActiveSession::Leaderboard(s) => render_leaderboard(s),
    }
}
