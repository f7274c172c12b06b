//! Guild roster records as returned by the upstream guild query.

use serde::{Deserialize, Serialize};

use crate::naming::slugify;
use crate::types::{ClassId, MemberId};

/// One guild member, sourced verbatim from the roster query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMember {
    pub id: MemberId,
    pub name: String,
    #[serde(rename = "classID")]
    pub class_id: ClassId,
    #[serde(default)]
    pub hidden: bool,
    pub server: Server,
}

/// Home server of a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub region: Option<Region>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub slug: String,
}

impl GuildMember {
    /// Region slug of the member's server, or `fallback` when the roster
    /// did not report one.
    pub fn region_slug<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server
            .region
            .as_ref()
            .map(|r| r.slug.as_str())
            .unwrap_or(fallback)
    }
}

/// Iterate over the members that are not hidden, preserving roster order.
pub fn visible_members(roster: &[GuildMember]) -> impl Iterator<Item = &GuildMember> {
    roster.iter().filter(|m| !m.hidden)
}

/// Upstream coordinates identifying one guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildCoordinates {
    pub guild_name: String,
    /// Realm name converted with [`slugify`].
    pub realm_slug: String,
    pub region: String,
}

impl GuildCoordinates {
    pub fn new(guild_name: &str, realm_name: &str, region: &str) -> Self {
        Self {
            guild_name: guild_name.to_string(),
            realm_slug: slugify(realm_name),
            region: region.to_string(),
        }
    }
}

/// Raid zone and difficulty tier that ranking queries are scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaidSelection {
    pub zone_id: i64,
    pub difficulty: i64,
}
