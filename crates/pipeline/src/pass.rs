//! One full refresh: token, roster and catalog, batched rankings, aggregate.

use std::collections::HashMap;

use guildboard_core::catalog::ClassCatalog;
use guildboard_core::leaderboard::{aggregate, LeaderboardEntry};
use guildboard_core::ranking::RankingResult;
use guildboard_core::roster::{visible_members, GuildCoordinates, GuildMember, RaidSelection};
use guildboard_core::types::MemberId;
use guildboard_warcraftlogs::UpstreamError;

use crate::policy::{run_batched, BatchPolicy};
use crate::source::GuildDataSource;

/// What a pass fetches and how it paces itself.
#[derive(Debug, Clone)]
pub struct PassConfig {
    pub guild: GuildCoordinates,
    pub raid: RaidSelection,
    /// Visible members beyond this cap are listed as "Not fetched".
    pub max_characters: usize,
    pub batch: BatchPolicy,
}

/// Run one refresh pass against `source`.
///
/// Token and roster failures abort the pass. A catalog failure degrades to
/// an empty catalog. A failed ranking fetch degrades that member to the
/// "Unknown" placeholder.
pub async fn run_pass(
    source: &dyn GuildDataSource,
    config: &PassConfig,
) -> Result<Vec<LeaderboardEntry>, UpstreamError> {
    let guild = &config.guild;
    tracing::info!(
        guild = %guild.guild_name,
        realm = %guild.realm_slug,
        region = %guild.region,
        zone = config.raid.zone_id,
        difficulty = config.raid.difficulty,
        "Starting leaderboard refresh"
    );

    let token = source.access_token().await?;

    let (roster, catalog) = tokio::join!(source.roster(&token, guild), source.catalog(&token));
    let roster = roster?;
    let catalog = catalog.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Class catalog unavailable, continuing without it");
        ClassCatalog::empty()
    });

    let to_fetch: Vec<GuildMember> = visible_members(&roster)
        .take(config.max_characters)
        .cloned()
        .collect();
    tracing::info!(
        roster = roster.len(),
        fetching = to_fetch.len(),
        batches = config.batch.batch_count(to_fetch.len()),
        "Fetching character rankings"
    );

    let token = &token;
    let fallback_region = guild.region.as_str();
    let raid = config.raid;
    let fetched = run_batched(config.batch, to_fetch, |member| async move {
        let ranking = source
            .character_rankings(token, &member, fallback_region, raid)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(member = %member.name, error = %e, "Ranking fetch failed");
                RankingResult::unknown()
            });
        (member.id, ranking)
    })
    .await;

    let rankings: HashMap<MemberId, RankingResult> = fetched.into_iter().collect();
    let entries = aggregate(&roster, &catalog, &rankings);
    tracing::info!(entries = entries.len(), "Leaderboard refresh complete");
    Ok(entries)
}
