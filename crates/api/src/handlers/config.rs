use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Public guild settings for the presentation layer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildConfigResponse {
    pub guild_name: String,
    pub realm_name: String,
    pub region: String,
}

/// GET /api/config
pub async fn get_config(State(state): State<AppState>) -> Json<GuildConfigResponse> {
    let guild = &state.config.guild;
    Json(GuildConfigResponse {
        guild_name: guild.guild_name.clone(),
        realm_name: guild.realm_name.clone(),
        region: guild.region.clone(),
    })
}
