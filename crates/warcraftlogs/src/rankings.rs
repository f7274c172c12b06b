//! Typed decoding of the per-character ranking payloads.
//!
//! `zoneRankings`, `specRankings` and `gameData` are untyped JSON scalars in
//! the upstream schema. Depending on the API version they arrive either as
//! an embedded object or as a string holding encoded JSON. [`decode_embedded`]
//! accepts both, and [`decode_character`] turns a whole character node into
//! a [`RankingResult`] so nothing downstream sees the raw shapes.

use guildboard_core::ranking::{
    round_score, top_performances, BestPerformance, Progress, RankingResult, UNKNOWN_SPEC,
};
use guildboard_core::types::SpecId;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::UpstreamError;
use crate::graphql::null_as_default;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CharacterDataResponse {
    #[serde(rename = "characterData")]
    pub character_data: Option<CharacterData>,
}

#[derive(Debug, Deserialize)]
pub struct CharacterData {
    pub character: Option<CharacterNode>,
}

/// Raw character node. Each field is an embedded JSON payload.
#[derive(Debug, Default, Deserialize)]
pub struct CharacterNode {
    #[serde(rename = "zoneRankings")]
    pub zone_rankings: Option<serde_json::Value>,
    #[serde(rename = "gameData")]
    pub game_data: Option<serde_json::Value>,
    #[serde(rename = "specRankings")]
    pub spec_rankings: Option<serde_json::Value>,
}

/// Decoded `zoneRankings` payload.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRankings {
    pub best_performance_average: Option<f64>,
    pub spec: Option<String>,
    #[serde(rename = "specID")]
    pub spec_id: Option<SpecId>,
    pub total_kills: Option<u32>,
    pub total_bosses: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rankings: Vec<EncounterRanking>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterRanking {
    pub encounter: Option<Encounter>,
    pub rank_percent: Option<f64>,
    #[serde(rename = "reportID")]
    pub report_id: Option<String>,
    #[serde(rename = "fightID")]
    pub fight_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct Encounter {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
struct SpecRankings {
    spec: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CharacterGameData {
    #[serde(rename = "itemLevel")]
    item_level: Option<f64>,
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode an embedded payload that is either a JSON object or a string of
/// encoded JSON.
pub fn decode_embedded<T: DeserializeOwned>(raw: serde_json::Value) -> Result<T, UpstreamError> {
    let decoded = match raw {
        serde_json::Value::String(encoded) => serde_json::from_str(&encoded),
        other => serde_json::from_value(other),
    };
    decoded.map_err(|e| UpstreamError::RankingParse(e.to_string()))
}

impl ZoneRankings {
    /// Convert into a [`RankingResult`].
    ///
    /// `fallback_spec` is used when this payload carries no spec.
    pub fn into_ranking(self, fallback_spec: Option<String>, item_level: f64) -> RankingResult {
        let spec = self
            .spec
            .filter(|s| !s.is_empty() && s != UNKNOWN_SPEC)
            .or(fallback_spec)
            .unwrap_or_else(|| UNKNOWN_SPEC.to_string());

        let progress = match (self.total_kills, self.total_bosses) {
            (Some(kills), Some(total_bosses)) => Progress {
                kills,
                total_bosses,
            },
            _ => Progress::default(),
        };

        let mut boss_scores = IndexMap::new();
        let mut performances = Vec::new();
        for ranking in self.rankings {
            let (Some(encounter), Some(percent)) = (ranking.encounter, ranking.rank_percent) else {
                continue;
            };
            if percent <= 0.0 {
                continue;
            }
            let score = round_score(percent);
            boss_scores.insert(encounter.name.clone(), score);
            performances.push(BestPerformance {
                boss: encounter.name,
                score,
                report_id: ranking.report_id,
                fight_id: ranking.fight_id,
            });
        }

        RankingResult {
            score: self.best_performance_average.map(round_score).unwrap_or(0),
            spec,
            spec_id: self.spec_id,
            progress,
            boss_scores,
            best_performances: top_performances(performances),
            item_level,
        }
    }
}

fn decode_item_level(raw: Option<serde_json::Value>, member: &str) -> f64 {
    let Some(raw) = raw.filter(|v| !v.is_null()) else {
        return 0.0;
    };
    match decode_embedded::<CharacterGameData>(raw) {
        Ok(game_data) => game_data
            .item_level
            .filter(|ilvl| ilvl.is_finite() && *ilvl > 0.0)
            .unwrap_or(0.0),
        Err(e) => {
            tracing::warn!(member, error = %e, "Failed to parse game data");
            0.0
        }
    }
}

fn decode_spec_fallback(raw: Option<serde_json::Value>, member: &str) -> Option<String> {
    let raw = raw.filter(|v| !v.is_null())?;
    match decode_embedded::<SpecRankings>(raw) {
        Ok(spec_rankings) => spec_rankings.spec.filter(|s| !s.is_empty()),
        Err(e) => {
            tracing::warn!(member, error = %e, "Failed to parse spec rankings");
            None
        }
    }
}

/// Normalize a character node into a [`RankingResult`].
///
/// Never fails: a missing character or an undecodable `zoneRankings`
/// payload yields [`RankingResult::unknown`] (with the item level still
/// attached when `gameData` is readable).
pub fn decode_character(node: Option<CharacterNode>, member: &str) -> RankingResult {
    let Some(node) = node else {
        tracing::debug!(member, "Character has no ranking data");
        return RankingResult::unknown();
    };

    let item_level = decode_item_level(node.game_data, member);

    let zone = match node.zone_rankings.filter(|v| !v.is_null()) {
        Some(raw) => decode_embedded::<ZoneRankings>(raw),
        None => Ok(ZoneRankings::default()),
    };

    match zone {
        Ok(zone) => {
            let fallback_spec = if zone.spec.as_deref().is_some_and(|s| s != UNKNOWN_SPEC) {
                None
            } else {
                decode_spec_fallback(node.spec_rankings, member)
            };
            zone.into_ranking(fallback_spec, item_level)
        }
        Err(e) => {
            tracing::warn!(member, error = %e, "Failed to parse rankings");
            RankingResult {
                item_level,
                ..RankingResult::unknown()
            }
        }
    }
}
