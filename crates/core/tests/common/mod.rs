//! In-process fake recommendation service for integration tests.
//!
//! Serves the four endpoints the client speaks over real HTTP on an
//! ephemeral port and records every request body it receives.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A request received by the fake service.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
pub struct FakeService {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start serving on 127.0.0.1 and return the base URL.
    pub async fn spawn(&self) -> String {
        serve(self.router()).await
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Bodies posted to `path`, in order.
    pub fn bodies(&self, path: &str) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .filter_map(|r| r.body)
            .collect()
    }

    fn record(&self, path: impl Into<String>, body: Option<Value>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            path: path.into(),
            body,
        });
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/search", post(search))
            .route("/recipe/{id}", get(recipe))
            .route("/feedback", post(feedback))
            .route("/top-feedback", get(top_feedback))
            .with_state(self.clone())
    }
}

async fn search(State(service): State<FakeService>, Json(body): Json<Value>) -> Json<Value> {
    let query = body["query"].as_str().unwrap_or_default().trim().to_string();
    let healthy = body["healthy"].as_bool().unwrap_or(false);
    service.record("/search", Some(body));

    if query.is_empty() {
        return Json(json!({"results": []}));
    }

    Json(json!({
        "results": [
            {"id": 1, "name": "Egg Rice", "calories": 320.0, "minutes": 10, "n_ingredients": 3, "score": 0.93},
            {"id": 2, "name": "Plain Congee", "calories": null, "minutes": 45, "n_ingredients": 2, "score": 0.71}
        ],
        "query": query,
        "healthy": healthy
    }))
}

async fn recipe(State(service): State<FakeService>, Path(id): Path<String>) -> Response {
    service.record(format!("/recipe/{}", id), None);

    if id != "1" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "single positional indexer is out-of-bounds")
            .into_response();
    }

    Json(json!({
        "recipe": {
            "id": 1,
            "name": "Egg Rice",
            "ingredients_list": ["egg", "rice"],
            "steps_list": ["boil", "mix"]
        }
    }))
    .into_response()
}

async fn feedback(State(service): State<FakeService>, Json(body): Json<Value>) -> Json<Value> {
    service.record("/feedback", Some(body));
    Json(json!({"status": "success"}))
}

async fn top_feedback(State(service): State<FakeService>) -> Json<Value> {
    service.record("/top-feedback", None);
    Json(json!({
        "recipes": [
            {"id": 1, "name": "Egg Rice", "calories": 320.0, "minutes": 10, "n_ingredients": 3, "feedback_count": 4},
            {"id": 7, "name": "Fried Rice", "calories": 410.5, "minutes": null, "n_ingredients": null, "feedback_count": 2}
        ]
    }))
}

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A service whose responses are all malformed.
pub fn malformed_router() -> Router {
    Router::new()
        .route("/search", post(|| async { Json(json!({"items": []})) }))
        .route("/top-feedback", get(|| async { "<html>oops</html>" }))
        .route(
            "/recipe/{id}",
            get(|| async { Json(json!({"recipe": {"id": 1, "name": "Egg Rice"}})) }),
        )
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
