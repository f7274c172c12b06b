//! Aggregation of roster, catalog and ranking data into the leaderboard.
//!
//! Pure logic -- no network access. The pipeline fetches the inputs and
//! passes them in.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::ClassCatalog;
use crate::ranking::{BestPerformance, RankingResult};
use crate::roster::{visible_members, GuildMember};
use crate::types::{ClassId, MemberId};

/// One row of the leaderboard, carrying everything the presentation layer
/// displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: MemberId,
    pub name: String,
    pub class: String,
    pub class_id: ClassId,
    pub class_slug: String,
    pub spec: String,
    pub spec_slug: String,
    pub score: u32,
    pub item_level: f64,
    pub server: String,
    pub progress: String,
    pub boss_scores: IndexMap<String, u32>,
    pub best_performances: Vec<BestPerformance>,
}

/// Decorate one member with catalog and ranking data.
pub fn build_entry(
    member: &GuildMember,
    catalog: &ClassCatalog,
    ranking: &RankingResult,
) -> LeaderboardEntry {
    let (class_name, class_slug) = catalog.class_name_and_slug(member.class_id);
    let spec = catalog.resolve_spec(member.class_id, ranking.spec_id, &ranking.spec);

    LeaderboardEntry {
        id: member.id,
        name: member.name.clone(),
        class: class_name.to_string(),
        class_id: member.class_id,
        class_slug: class_slug.to_string(),
        spec: spec.name,
        spec_slug: spec.slug,
        score: ranking.score,
        item_level: ranking.item_level,
        server: member.server.name.clone(),
        progress: ranking.progress.to_string(),
        boss_scores: ranking.boss_scores.clone(),
        best_performances: ranking.best_performances.clone(),
    }
}

/// Build the ranked leaderboard.
///
/// - Hidden members are dropped.
/// - Members without an entry in `rankings` were never queried and get the
///   "Not fetched" placeholder.
/// - The result is sorted by score, highest first. The sort is stable, so
///   equal scores keep roster order.
pub fn aggregate(
    roster: &[GuildMember],
    catalog: &ClassCatalog,
    rankings: &HashMap<MemberId, RankingResult>,
) -> Vec<LeaderboardEntry> {
    let not_fetched = RankingResult::not_fetched();

    let mut entries: Vec<LeaderboardEntry> = visible_members(roster)
        .map(|member| {
            let ranking = rankings.get(&member.id).unwrap_or(&not_fetched);
            build_entry(member, catalog, ranking)
        })
        .collect();

    sort_by_score(&mut entries);
    entries
}

/// Stable sort, highest score first.
pub fn sort_by_score(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
}
