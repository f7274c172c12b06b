//! GraphQL documents sent to the v2 client API.

/// Guild roster by guild name, server region and server slug.
pub const GUILD_ROSTER: &str = r#"
query ($guildName: String!, $serverRegion: String!, $serverSlug: String!) {
  guildData {
    guild(name: $guildName, serverRegion: $serverRegion, serverSlug: $serverSlug) {
      id
      name
      members {
        data {
          id
          name
          classID
          hidden
          server {
            slug
            name
            region {
              slug
            }
          }
        }
      }
    }
  }
}
"#;

/// Static class and spec catalog.
pub const CLASS_CATALOG: &str = r#"
query {
  gameData {
    classes {
      id
      name
      slug
      specs {
        id
        name
        slug
      }
    }
  }
}
"#;

/// Zone rankings for one character.
///
/// `specRankings` repeats `zoneRankings` with combatant info so that a spec
/// can still be found when the plain ranking omits it.
pub const CHARACTER_RANKINGS: &str = r#"
query (
  $name: String!
  $serverSlug: String!
  $serverRegion: String!
  $zoneID: Int!
  $difficulty: Int!
) {
  characterData {
    character(name: $name, serverSlug: $serverSlug, serverRegion: $serverRegion) {
      zoneRankings(zoneID: $zoneID, difficulty: $difficulty, metric: dps)
      gameData
      specRankings: zoneRankings(
        zoneID: $zoneID
        difficulty: $difficulty
        metric: dps
        includeCombatantInfo: true
      )
    }
  }
}
"#;
