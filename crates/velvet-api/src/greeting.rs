use axum::Json;
use velvet_types::api::GreetingResponse;

/// GET /api/greeting
pub async fn greeting() -> Json<GreetingResponse> {
    Json(GreetingResponse::default())
}

/// GET /health — liveness check.
pub async fn health() -> &'static str {
    "ok"
}
