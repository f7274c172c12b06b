//! Offline data source with a fixed roster and randomized boss scores.

use std::collections::HashMap;

use async_trait::async_trait;
use guildboard_core::catalog::{ClassCatalog, ClassInfo, SpecInfo};
use guildboard_core::naming::slugify;
use guildboard_core::ranking::{
    round_score, top_performances, BestPerformance, Progress, RankingResult, DEFAULT_TOTAL_BOSSES,
};
use guildboard_core::roster::{GuildCoordinates, GuildMember, RaidSelection, Region, Server};
use guildboard_core::types::{ClassId, SpecId};
use guildboard_warcraftlogs::{AccessToken, UpstreamError};
use indexmap::IndexMap;
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::source::GuildDataSource;

const BOSSES: [&str; DEFAULT_TOTAL_BOSSES as usize] = [
    "Vael'thyz the Corruptor",
    "Delerium Dreadsmoke",
    "Volcoross",
    "Slegix the Cruel",
    "Tindral Sageswift",
    "Primordial Elements",
    "Smolderon",
    "Tyr, the Infinite Keeper",
    "Fyrakk",
];

/// Per-boss scores wander this far from the character's base score.
const SCORE_SPREAD: f64 = 10.0;

struct MockPlayer {
    name: &'static str,
    class_id: ClassId,
    class: &'static str,
    spec_id: SpecId,
    spec: &'static str,
    score: u32,
    item_level: u32,
    kills: u32,
}

#[allow(clippy::too_many_arguments)]
const fn player(
    name: &'static str,
    class_id: ClassId,
    class: &'static str,
    spec_id: SpecId,
    spec: &'static str,
    score: u32,
    item_level: u32,
    kills: u32,
) -> MockPlayer {
    MockPlayer {
        name,
        class_id,
        class,
        spec_id,
        spec,
        score,
        item_level,
        kills,
    }
}

static PLAYERS: [MockPlayer; 20] = [
    player("Powerhealer", 7, "Priest", 257, "Holy", 97, 489, 9),
    player("Tankbuster", 11, "Warrior", 73, "Protection", 94, 487, 9),
    player("Shadowmaster", 10, "Warlock", 267, "Destruction", 91, 486, 8),
    player("Arrowstorm", 3, "Hunter", 254, "Marksmanship", 89, 485, 9),
    player("Frostbite", 4, "Mage", 64, "Frost", 88, 484, 8),
    player("Lightbringer", 6, "Paladin", 70, "Retribution", 85, 483, 7),
    player("Windwalker", 5, "Monk", 269, "Windwalker", 83, 482, 8),
    player("Stormcaller", 9, "Shaman", 262, "Elemental", 80, 480, 7),
    player("Moonfire", 2, "Druid", 102, "Balance", 77, 479, 6),
    player("Deathstrike", 1, "Death Knight", 250, "Blood", 75, 478, 7),
    player("Chaoshunter", 12, "Demon Hunter", 577, "Havoc", 72, 477, 6),
    player("Firebreather", 13, "Evoker", 1467, "Devastation", 70, 476, 5),
    player("Backstabber", 8, "Rogue", 261, "Subtlety", 67, 475, 6),
    player("Soulstealer", 10, "Warlock", 265, "Affliction", 64, 474, 5),
    player("Berserker", 11, "Warrior", 72, "Fury", 60, 473, 4),
    player("Healbot", 9, "Shaman", 264, "Restoration", 55, 471, 4),
    player("Arcanist", 4, "Mage", 62, "Arcane", 50, 468, 3),
    player("Lifegiver", 2, "Druid", 105, "Restoration", 45, 465, 3),
    player("Vengeance", 12, "Demon Hunter", 581, "Vengeance", 40, 462, 2),
    player("Shadowpriest", 7, "Priest", 258, "Shadow", 35, 458, 2),
];

/// [`GuildDataSource`] that never touches the network.
///
/// Twenty characters covering every class. Each refresh rolls new per-boss
/// scores around the character's base score.
#[derive(Debug, Clone)]
pub struct MockSource {
    server: Server,
}

impl MockSource {
    pub fn new(realm_name: &str, region: &str) -> Self {
        Self {
            server: Server {
                slug: slugify(realm_name),
                name: realm_name.to_string(),
                region: Some(Region {
                    slug: region.to_string(),
                }),
            },
        }
    }

    fn player(&self, member: &GuildMember) -> Option<&'static MockPlayer> {
        let index = usize::try_from(member.id).ok()?.checked_sub(1)?;
        PLAYERS.get(index).filter(|p| p.name == member.name)
    }
}

fn random_report_id(rng: &mut impl Rng) -> String {
    let suffix: String = rng
        .sample_iter(Alphanumeric)
        .take(8)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("report-{suffix}")
}

fn roll_ranking(player: &MockPlayer) -> RankingResult {
    let mut rng = rand::rng();
    let mut boss_scores = IndexMap::new();
    let mut performances = Vec::with_capacity(BOSSES.len());

    for boss in BOSSES {
        let jitter = rng.random_range(-SCORE_SPREAD..SCORE_SPREAD);
        let score = round_score(f64::from(player.score) + jitter).clamp(1, 99);
        boss_scores.insert(boss.to_string(), score);
        performances.push(BestPerformance {
            boss: boss.to_string(),
            score,
            report_id: Some(random_report_id(&mut rng)),
            fight_id: Some(rng.random_range(0..100)),
        });
    }

    RankingResult {
        score: player.score,
        spec: player.spec.to_string(),
        spec_id: Some(player.spec_id),
        progress: Progress {
            kills: player.kills,
            total_bosses: DEFAULT_TOTAL_BOSSES,
        },
        boss_scores,
        best_performances: top_performances(performances),
        item_level: f64::from(player.item_level),
    }
}

#[async_trait]
impl GuildDataSource for MockSource {
    async fn access_token(&self) -> Result<AccessToken, UpstreamError> {
        Ok(AccessToken::new("mock"))
    }

    async fn roster(
        &self,
        _token: &AccessToken,
        _guild: &GuildCoordinates,
    ) -> Result<Vec<GuildMember>, UpstreamError> {
        Ok(PLAYERS
            .iter()
            .zip(1..)
            .map(|(p, id)| GuildMember {
                id,
                name: p.name.to_string(),
                class_id: p.class_id,
                hidden: false,
                server: self.server.clone(),
            })
            .collect())
    }

    async fn catalog(&self, _token: &AccessToken) -> Result<ClassCatalog, UpstreamError> {
        let mut classes: HashMap<ClassId, ClassInfo> = HashMap::new();
        for p in &PLAYERS {
            let class = classes.entry(p.class_id).or_insert_with(|| ClassInfo {
                name: p.class.to_string(),
                slug: slugify(p.class),
                specs: HashMap::new(),
            });
            class.specs.insert(
                p.spec_id,
                SpecInfo {
                    name: p.spec.to_string(),
                    slug: slugify(p.spec),
                },
            );
        }
        Ok(classes.into_iter().collect())
    }

    async fn character_rankings(
        &self,
        _token: &AccessToken,
        member: &GuildMember,
        _fallback_region: &str,
        _raid: RaidSelection,
    ) -> Result<RankingResult, UpstreamError> {
        Ok(self
            .player(member)
            .map(roll_ranking)
            .unwrap_or_else(RankingResult::unknown))
    }
}
