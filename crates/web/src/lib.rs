use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use storage::dto::common::ErrorResponse;

pub mod config;
pub mod error;
pub mod features;
pub mod state;

use state::AppState;

/// Upper bound on JSON request bodies.
const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// API routes without transport concerns (CORS, tracing, docs), which `main` adds.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api", get(health))
        .nest("/api/workouts", features::workouts::routes::routes())
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "message": "Workout API is running" }))
}

async fn route_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Route not found")),
    )
        .into_response()
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
        .into_response()
}
