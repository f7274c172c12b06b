use std::sync::Arc;

use guildboard_pipeline::{GuildDataSource, LeaderboardCache, MockSource};
use guildboard_warcraftlogs::{UpstreamError, WarcraftLogsClient};

use crate::config::{GuildConfig, ServerConfig};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Leaderboard cache, refreshed on demand through the configured source.
    pub cache: Arc<LeaderboardCache>,
}

impl AppState {
    /// Build state around an already chosen data source.
    pub fn new(config: ServerConfig, source: Arc<dyn GuildDataSource>) -> Self {
        let cache = LeaderboardCache::new(
            source,
            config.guild.pass_config(),
            config.guild.cache_ttl(),
        );
        Self {
            config: Arc::new(config),
            cache: Arc::new(cache),
        }
    }
}

/// Pick the data source the configuration asks for.
pub fn build_source(guild: &GuildConfig) -> Result<Arc<dyn GuildDataSource>, UpstreamError> {
    if guild.use_mock_data {
        tracing::warn!("USE_MOCK_DATA is set, serving generated leaderboard data");
        return Ok(Arc::new(MockSource::new(&guild.realm_name, &guild.region)));
    }
    Ok(Arc::new(WarcraftLogsClient::new(guild.warcraftlogs())?))
}
