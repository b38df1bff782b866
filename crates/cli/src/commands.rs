//! One-shot subcommands.

use std::io::Write;

use anyhow::{anyhow, bail, Result};
use leftover_core::{view, ActiveSession, Navigator, RecipeId, SearchStatus, View};

use crate::cli::{FeedbackArgs, RecipeArgs, SearchArgs};

/// Write the current view to `out`.
pub fn print_view(navigator: &Navigator, out: &mut impl Write) -> Result<()> {
    for line in view::render(navigator.current()) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// The request failure the current view is showing, if any.
fn failure(session: &ActiveSession) -> Option<String> {
    match session {
        ActiveSession::Search(s) => match s.status() {
            SearchStatus::Failed(e) => Some(e.to_string()),
            _ => None,
        },
        ActiveSession::Recipe(s) => s.status().error().map(ToString::to_string),
        ActiveSession::Leaderboard(s) => s.status().error().map(ToString::to_string),
    }
}

/// Wait for outstanding requests, print the view and surface any failure.
async fn finish(navigator: &mut Navigator, out: &mut impl Write) -> Result<()> {
    navigator.settle().await?;
    print_view(navigator, out)?;
    match failure(navigator.current()) {
        Some(e) => Err(anyhow!(e)),
        None => Ok(()),
    }
}

pub async fn search(navigator: &mut Navigator, args: &SearchArgs, out: &mut impl Write) -> Result<()> {
    navigator.update_query(args.query_text());
    if args.healthy {
        navigator.toggle_healthy();
    }
    if !navigator.submit_search() {
        bail!("Enter at least one ingredient");
    }
    finish(navigator, out).await
}

pub async fn recipe(navigator: &mut Navigator, args: &RecipeArgs, out: &mut impl Write) -> Result<()> {
    navigator.navigate(View::Recipe {
        id: RecipeId::from(args.id.as_str()),
        origin_query: args.query.clone(),
    });
    finish(navigator, out).await
}

/// Rate a recipe, then follow the redirect back to search.
pub async fn feedback(
    navigator: &mut Navigator,
    args: &FeedbackArgs,
    out: &mut impl Write,
) -> Result<()> {
    navigator.navigate(View::Recipe {
        id: RecipeId::from(args.id.as_str()),
        origin_query: args.query.clone(),
    });
    navigator.settle().await?;
    if let Some(e) = failure(navigator.current()) {
        bail!("Could not load recipe {}: {}", args.id, e);
    }

    if !navigator.send_feedback(args.is_helpful()) {
        bail!("Recipe {} cannot be rated", args.id);
    }
    navigator.settle().await?;
    print_view(navigator, out)?;

    while matches!(navigator.view(), View::Recipe { .. }) {
        navigator.pump().await?;
    }
    writeln!(out)?;
    print_view(navigator, out)
}

pub async fn top(navigator: &mut Navigator, out: &mut impl Write) -> Result<()> {
    navigator.navigate(View::Leaderboard);
    finish(navigator, out).await
}
