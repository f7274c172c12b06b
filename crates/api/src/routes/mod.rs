pub mod config;
pub mod health;
pub mod leaderboard;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /config                     guild settings
/// /leaderboard                ranked guild members (?refresh=true forces a pass)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(config::router())
        .merge(leaderboard::router())
}
