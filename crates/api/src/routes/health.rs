use axum::extract::State;
use axum::{routing::get, Json, Router};
use guildboard_pipeline::CacheStatus;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether a leaderboard is cached, and from when.
    pub cache: CacheStatus,
}

/// GET /health -- returns service and cache health.
///
/// Never triggers a refresh and never waits for one in flight.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        cache: state.cache.status().await,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
