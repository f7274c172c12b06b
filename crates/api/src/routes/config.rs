use axum::routing::get;
use axum::Router;

use crate::handlers::config;
use crate::state::AppState;

/// ```text
/// GET /config  -> get_config
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/config", get(config::get_config))
}
