//! The seam between the pipeline and wherever guild data comes from.

use async_trait::async_trait;
use guildboard_core::catalog::ClassCatalog;
use guildboard_core::ranking::RankingResult;
use guildboard_core::roster::{GuildCoordinates, GuildMember, RaidSelection};
use guildboard_warcraftlogs::{AccessToken, UpstreamError, WarcraftLogsClient};

/// Upstream operations a refresh pass needs.
///
/// Implemented by [`WarcraftLogsClient`] for production and by
/// [`MockSource`](crate::mock::MockSource) for offline demos.
#[async_trait]
pub trait GuildDataSource: Send + Sync {
    async fn access_token(&self) -> Result<AccessToken, UpstreamError>;

    async fn roster(
        &self,
        token: &AccessToken,
        guild: &GuildCoordinates,
    ) -> Result<Vec<GuildMember>, UpstreamError>;

    async fn catalog(&self, token: &AccessToken) -> Result<ClassCatalog, UpstreamError>;

    /// Ranking for one member. `fallback_region` is used when the member's
    /// server carries no region.
    async fn character_rankings(
        &self,
        token: &AccessToken,
        member: &GuildMember,
        fallback_region: &str,
        raid: RaidSelection,
    ) -> Result<RankingResult, UpstreamError>;
}

#[async_trait]
impl GuildDataSource for WarcraftLogsClient {
    async fn access_token(&self) -> Result<AccessToken, UpstreamError> {
        WarcraftLogsClient::access_token(self).await
    }

    async fn roster(
        &self,
        token: &AccessToken,
        guild: &GuildCoordinates,
    ) -> Result<Vec<GuildMember>, UpstreamError> {
        self.guild_roster(token, guild).await
    }

    async fn catalog(&self, token: &AccessToken) -> Result<ClassCatalog, UpstreamError> {
        self.class_catalog(token).await
    }

    async fn character_rankings(
        &self,
        token: &AccessToken,
        member: &GuildMember,
        fallback_region: &str,
        raid: RaidSelection,
    ) -> Result<RankingResult, UpstreamError> {
        WarcraftLogsClient::character_rankings(self, token, member, fallback_region, raid).await
    }
}
