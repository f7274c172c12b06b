//! Per-character ranking results.
//!
//! A [`RankingResult`] is the normalized form of the upstream zone-ranking
//! payload. Scores are percentiles in `0..=100`, rounded to integers before
//! they reach this type.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::SpecId;

/// Spec label for characters whose ranking data was missing or unreadable.
pub const UNKNOWN_SPEC: &str = "Unknown";

/// Spec label for characters beyond the processing cap.
pub const NOT_FETCHED_SPEC: &str = "Not fetched";

/// Number of best performances kept per character.
pub const MAX_BEST_PERFORMANCES: usize = 3;

/// Boss count assumed when the upstream does not report raid progress.
pub const DEFAULT_TOTAL_BOSSES: u32 = 9;

/// Round a raw percentile to a display score.
///
/// NaN, infinities and non-positive values become 0.
pub fn round_score(raw: f64) -> u32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    raw.round().min(f64::from(u32::MAX)) as u32
}

/// Raid progress, displayed as `kills/total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub kills: u32,
    pub total_bosses: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            kills: 0,
            total_bosses: DEFAULT_TOTAL_BOSSES,
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kills, self.total_bosses)
    }
}

/// One of a character's best individual boss performances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestPerformance {
    pub boss: String,
    pub score: u32,
    #[serde(rename = "reportID")]
    pub report_id: Option<String>,
    #[serde(rename = "fightID")]
    pub fight_id: Option<i64>,
}

/// Keep the top [`MAX_BEST_PERFORMANCES`] entries, highest score first.
///
/// Equal scores keep the order they were reported in.
pub fn top_performances(mut performances: Vec<BestPerformance>) -> Vec<BestPerformance> {
    performances.sort_by(|a, b| b.score.cmp(&a.score));
    performances.truncate(MAX_BEST_PERFORMANCES);
    performances
}

/// Normalized ranking data for one character.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingResult {
    pub score: u32,
    pub spec: String,
    pub spec_id: Option<SpecId>,
    pub progress: Progress,
    /// Boss name → rounded rank percentile, in reported order.
    pub boss_scores: IndexMap<String, u32>,
    /// Already trimmed and sorted by [`top_performances`].
    pub best_performances: Vec<BestPerformance>,
    pub item_level: f64,
}

impl RankingResult {
    /// Zeroed result for a character whose ranking could not be read.
    pub fn unknown() -> Self {
        Self::placeholder(UNKNOWN_SPEC)
    }

    /// Zeroed result for a character that was never queried.
    pub fn not_fetched() -> Self {
        Self::placeholder(NOT_FETCHED_SPEC)
    }

    fn placeholder(spec: &str) -> Self {
        Self {
            score: 0,
            spec: spec.to_string(),
            spec_id: None,
            progress: Progress::default(),
            boss_scores: IndexMap::new(),
            best_performances: Vec::new(),
            item_level: 0.0,
        }
    }
}
