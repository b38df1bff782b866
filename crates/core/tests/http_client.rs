//! HttpRecipeClient against a real HTTP server.

mod common;

use common::{malformed_router, serve, unreachable_url, FakeService};
use leftover_core::{
    Endpoint, FeedbackSubmission, HttpRecipeClient, Query, RecipeId, RecipeService, RequestError,
    ServiceConfig,
};
use serde_json::json;

fn client(base_url: &str) -> HttpRecipeClient {
    HttpRecipeClient::new(&ServiceConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_search_sends_query_and_healthy_flag() {
    let service = FakeService::new();
    let client = client(&service.spawn().await);

    let results = client
        .search(&Query::new("egg, rice", true))
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    let first = &results[0];
    assert_eq!(first.id, RecipeId::from(1));
    assert_eq!(first.name, "Egg Rice");
    assert_eq!(first.calories, Some(320.0));
    assert_eq!(first.minutes, Some(10));
    assert_eq!(first.n_ingredients, Some(3));
    assert!(results[1].calories.is_none());

    assert_eq!(
        service.bodies("/search"),
        vec![json!({"query": "egg, rice", "healthy": true})]
    );
}

#[tokio::test]
async fn test_search_with_no_results() {
    let service = FakeService::new();
    let client = client(&service.spawn().await);

    let results = client.search(&Query::new(" ", false)).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_recipe_detail_keeps_list_order() {
    let service = FakeService::new();
    let client = client(&service.spawn().await);

    let detail = client.recipe(&RecipeId::from(1)).await.unwrap();
    assert_eq!(detail.name, "Egg Rice");
    assert_eq!(detail.ingredients_list, vec!["egg", "rice"]);
    assert_eq!(detail.steps_list, vec!["boil", "mix"]);

    let paths: Vec<_> = service.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/recipe/1"]);
}

#[tokio::test]
async fn test_feedback_wire_shape() {
    let service = FakeService::new();
    let client = client(&service.spawn().await);

    client
        .submit_feedback(&FeedbackSubmission {
            recipe_id: RecipeId::from("1"),
            query: String::new(),
            helpful: true,
        })
        .await
        .unwrap();

    assert_eq!(
        service.bodies("/feedback"),
        vec![json!({"recipe_id": "1", "query": "", "helpful": 1})]
    );
}

#[tokio::test]
async fn test_top_feedback() {
    let service = FakeService::new();
    let client = client(&service.spawn().await);

    let entries = client.top_feedback().await.unwrap();
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Egg Rice", "Fried Rice"]);
    assert_eq!(entries[0].feedback_count, 4);
    assert!(entries[1].minutes.is_none());
}

#[tokio::test]
async fn test_generic_send_returns_json() {
    let service = FakeService::new();
    let client = client(&service.spawn().await);

    let value = client
        .send::<()>(&Endpoint::TopFeedback, None)
        .await
        .unwrap();
    assert_eq!(value["recipes"][0]["feedback_count"], json!(4));
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let service = FakeService::new();
    let client = client(&service.spawn().await);

    let err = client.recipe(&RecipeId::from(999)).await.unwrap_err();
    match err {
        RequestError::ServerError { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("out-of-bounds"));
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unexpected_shapes_are_decode_failures() {
    let client = client(&serve(malformed_router()).await);

    let search = client.search(&Query::new("egg", false)).await.unwrap_err();
    assert!(matches!(search, RequestError::DecodeFailure(_)));

    let top = client.top_feedback().await.unwrap_err();
    assert!(matches!(top, RequestError::DecodeFailure(_)));

    let recipe = client.recipe(&RecipeId::from(1)).await.unwrap_err();
    assert!(matches!(recipe, RequestError::DecodeFailure(_)));
}

#[tokio::test]
async fn test_refused_connection_is_network_failure() {
    let client = client(&unreachable_url().await);

    let err = client.top_feedback().await.unwrap_err();
    assert!(matches!(err, RequestError::NetworkFailure(_)));

    let err = client
        .submit_feedback(&FeedbackSubmission {
            recipe_id: RecipeId::from(1),
            query: "egg".to_string(),
            helpful: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RequestError::NetworkFailure(_)));
}
