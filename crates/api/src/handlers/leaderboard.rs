//! Handler for the guild leaderboard.

use axum::extract::{Query, State};
use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Response header telling whether the entries came from the cache.
pub const CACHE_HEADER: HeaderName = HeaderName::from_static("x-cache");

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    /// Only the literal `true` forces a refresh.
    pub refresh: Option<String>,
}

impl LeaderboardQuery {
    pub fn force_refresh(&self) -> bool {
        self.refresh.as_deref() == Some("true")
    }
}

/// GET /api/leaderboard?refresh=<bool>
///
/// Ranked entries for every visible guild member, highest score first.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> AppResult<Response> {
    let result = state.cache.get(query.force_refresh()).await?;

    let cache_state = if result.from_cache { "hit" } else { "miss" };
    tracing::debug!(
        entries = result.entries.len(),
        cache = cache_state,
        "Serving leaderboard"
    );

    Ok((
        [(CACHE_HEADER, HeaderValue::from_static(cache_state))],
        Json(result.entries.as_slice()),
    )
        .into_response())
}
