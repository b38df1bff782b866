//! End-to-end view flow over HTTP: search, open, feedback, redirect.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{unreachable_url, FakeService};
use leftover_core::{
    view, ActiveSession, FeedbackState, HttpRecipeClient, Navigator, RecipeId, SearchStatus,
    ServiceConfig, View,
};
use serde_json::json;

const REDIRECT_DELAY: Duration = Duration::from_millis(100);

fn navigator(base_url: &str) -> Navigator {
    let client = HttpRecipeClient::new(&ServiceConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    })
    .unwrap();
    Navigator::new(Arc::new(client), REDIRECT_DELAY)
}

#[tokio::test]
async fn test_search_open_feedback_redirect() {
    let service = FakeService::new();
    let mut navigator = navigator(&service.spawn().await);

    navigator.update_query("egg");
    assert!(navigator.submit_search());
    navigator.settle().await.unwrap();

    let lines = view::render(navigator.current());
    assert!(lines.contains(&" 1. Egg Rice | 320 calories | 10 minutes | 3 ingredients".to_string()));

    assert!(navigator.open_result(0));
    navigator.settle().await.unwrap();
    let lines = view::render(navigator.current());
    assert_eq!(lines[0], "Egg Rice");

    let voted_at = Instant::now();
    assert!(navigator.send_feedback(true));
    assert!(!navigator.send_feedback(false));
    navigator.settle().await.unwrap();

    match navigator.current() {
        ActiveSession::Recipe(s) => assert_eq!(
            s.feedback().state(),
            FeedbackState::Confirmed {
                helpful: true,
                delivered: true
            }
        ),
        other => panic!("expected recipe view, got {:?}", other),
    }

    assert!(matches!(navigator.view(), View::Recipe { .. }));
    assert!(navigator.pump().await.unwrap());
    assert!(voted_at.elapsed() >= REDIRECT_DELAY);
    assert_eq!(navigator.view(), View::Search);

    assert_eq!(
        service.bodies("/feedback"),
        vec![json!({"recipe_id": "1", "query": "egg", "helpful": 1})]
    );
}

#[tokio::test]
async fn test_feedback_from_direct_visit_sends_empty_query() {
    let service = FakeService::new();
    let mut navigator = navigator(&service.spawn().await);

    navigator.navigate(View::Recipe {
        id: RecipeId::from("1"),
        origin_query: String::new(),
    });
    navigator.settle().await.unwrap();
    navigator.send_feedback(true);
    navigator.settle().await.unwrap();

    assert_eq!(
        service.bodies("/feedback"),
        vec![json!({"recipe_id": "1", "query": "", "helpful": 1})]
    );
}

#[tokio::test]
async fn test_unreachable_service_surfaces_failures() {
    let mut navigator = navigator(&unreachable_url().await);

    navigator.update_query("egg");
    navigator.submit_search();
    navigator.settle().await.unwrap();
    match navigator.current() {
        ActiveSession::Search(s) => assert!(matches!(s.status(), SearchStatus::Failed(_))),
        other => panic!("expected search view, got {:?}", other),
    }

    navigator.navigate(View::Recipe {
        id: RecipeId::from(1),
        origin_query: "egg".to_string(),
    });
    navigator.settle().await.unwrap();
    let lines = view::render(navigator.current());
    assert!(lines[0].starts_with("Could not load recipe 1:"));
}
