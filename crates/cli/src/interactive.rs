//! Line-driven interactive session.
//!
//! Input lines and session events are handled as they arrive, so a pending
//! redirect back to search fires even while the prompt is idle.

use std::io::Write;

use anyhow::Result;
use leftover_core::{ActiveSession, Navigator, RecipeId, View};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::commands::print_view;

const HELP: &str = "Commands:
  search <ingredients>   search recipes, e.g. search chicken, rice, egg
  healthy                toggle the healthy-only filter
  open <n|id>            open result n, or a recipe by id
  helpful | not-helpful  rate the open recipe
  top                    show top rated recipes
  home                   back to search
  help                   show this list
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Search(String),
    Healthy,
    Open(String),
    Vote(bool),
    Top,
    Home,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Input>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let input = match command.to_ascii_lowercase().as_str() {
        "search" | "s" => Input::Search(rest.to_string()),
        "healthy" => Input::Healthy,
        "open" | "o" if !rest.is_empty() => Input::Open(rest.to_string()),
        "open" | "o" => return Err("Usage: open <n|id>".to_string()),
        "helpful" | "yes" => Input::Vote(true),
        "not-helpful" | "no" => Input::Vote(false),
        "top" => Input::Top,
        "home" => Input::Home,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(format!("Unknown command '{}'. Type help for a list.", other)),
    };
    Ok(Some(input))
}

/// Apply one command and print the resulting view.
pub fn apply(navigator: &mut Navigator, input: Input, out: &mut impl Write) -> Result<()> {
    match input {
        Input::Search(text) => {
            ensure_search(navigator);
            navigator.update_query(text);
            if !navigator.submit_search() {
                let message = if search_in_flight(navigator) {
                    "A search is already running."
                } else {
                    "Enter at least one ingredient."
                };
                writeln!(out, "{}", message)?;
                return Ok(());
            }
        }
        Input::Healthy => {
            ensure_search(navigator);
            navigator.toggle_healthy();
        }
        Input::Open(target) => open(navigator, &target),
        Input::Vote(helpful) => {
            if !navigator.send_feedback(helpful) {
                writeln!(out, "Nothing to rate here.")?;
                return Ok(());
            }
        }
        Input::Top => navigator.navigate(View::Leaderboard),
        Input::Home => navigator.navigate(View::Search),
        Input::Help => {
            writeln!(out, "{}", HELP)?;
            return Ok(());
        }
        Input::Quit => return Ok(()),
    }
    print_view(navigator, out)
}

fn search_in_flight(navigator: &Navigator) -> bool {
    matches!(navigator.current(), ActiveSession::Search(s) if s.is_searching())
}

fn ensure_search(navigator: &mut Navigator) {
    if navigator.view() != View::Search {
        navigator.navigate(View::Search);
    }
}

/// `n` opens the n-th search result when there is one; anything else is a recipe id.
fn open(navigator: &mut Navigator, target: &str) {
    let shown = match navigator.current() {
        ActiveSession::Search(s) => s.results().len(),
        _ => 0,
    };
    if let Ok(n) = target.parse::<usize>() {
        if (1..=shown).contains(&n) {
            navigator.open_result(n - 1);
            return;
        }
    }
    navigator.navigate(View::Recipe {
        id: RecipeId::from(target),
        origin_query: String::new(),
    });
}

pub async fn run(navigator: &mut Navigator) -> Result<()> {
    let mut out = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    writeln!(out, "{}\n", HELP)?;
    print_view(navigator, &mut out)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse(&line) {
                    Ok(Some(Input::Quit)) => break,
                    Ok(Some(input)) => apply(navigator, input, &mut out)?,
                    Ok(None) => {}
                    Err(message) => writeln!(out, "{}", message)?,
                }
            }
            event = navigator.next_event() => {
                if navigator.handle(event?) {
                    print_view(navigator, &mut out)?;
                }
            }
        }
    }

    debug!("Interactive session ended");
    Ok(())
}
