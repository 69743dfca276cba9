pub mod cache;
pub mod file_host;
pub mod greeting;
pub mod photos;
pub mod profiles;
pub mod state;
pub mod stats;

use axum::{Router, routing::get};
use velvet_types::routes;

use crate::state::AppState;

/// API routes with state applied. The binary adds CORS, tracing and the
/// static landing page on top.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::GREETING, get(greeting::greeting))
        .route(routes::BOT_STATS, get(stats::bot_stats))
        .route(routes::TOP_GIRLS, get(profiles::top_girls))
        .route(routes::GIRL_PHOTO, get(photos::girl_photo))
        .route(routes::HEALTH, get(greeting::health))
        .with_state(state)
}
