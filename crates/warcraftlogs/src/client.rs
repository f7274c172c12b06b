//! High-level Warcraft Logs client.
//!
//! [`WarcraftLogsClient`] bundles a pooled [`reqwest::Client`] with the
//! endpoint URLs and credentials, and exposes one method per upstream
//! operation the leaderboard pipeline needs.

use std::time::Duration;

use guildboard_core::catalog::{ClassCatalog, ClassInfo, SpecInfo};
use guildboard_core::ranking::RankingResult;
use guildboard_core::roster::{GuildCoordinates, GuildMember, RaidSelection};
use guildboard_core::types::{ClassId, SpecId};
use serde::Deserialize;

use crate::auth::{request_token, AccessToken, Credentials};
use crate::error::UpstreamError;
use crate::graphql::{self, null_as_default};
use crate::queries;
use crate::rankings::{decode_character, CharacterDataResponse};

/// Default OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://www.warcraftlogs.com/oauth/token";

/// Default GraphQL client API endpoint.
pub const DEFAULT_API_URL: &str = "https://www.warcraftlogs.com/api/v2/client";

/// HTTP timeout for a single upstream request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoint and credential configuration for [`WarcraftLogsClient`].
#[derive(Debug, Clone)]
pub struct WarcraftLogsConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_url: String,
    pub api_url: String,
}

impl Default for WarcraftLogsConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Client for the Warcraft Logs v2 API.
pub struct WarcraftLogsClient {
    http: reqwest::Client,
    config: WarcraftLogsConfig,
}

// ---------------------------------------------------------------------------
// Response shapes for the roster and catalog queries
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GuildDataResponse {
    #[serde(rename = "guildData")]
    guild_data: Option<GuildData>,
}

#[derive(Debug, Deserialize)]
struct GuildData {
    guild: Option<GuildNode>,
}

#[derive(Debug, Deserialize)]
struct GuildNode {
    members: Option<MemberPage>,
}

#[derive(Debug, Deserialize)]
struct MemberPage {
    #[serde(default, deserialize_with = "null_as_default")]
    data: Vec<GuildMember>,
}

#[derive(Debug, Deserialize)]
struct GameDataResponse {
    #[serde(rename = "gameData")]
    game_data: Option<GameData>,
}

#[derive(Debug, Deserialize)]
struct GameData {
    #[serde(default, deserialize_with = "null_as_default")]
    classes: Vec<GameClass>,
}

#[derive(Debug, Deserialize)]
struct GameClass {
    id: ClassId,
    name: String,
    slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    specs: Vec<GameSpec>,
}

#[derive(Debug, Deserialize)]
struct GameSpec {
    id: SpecId,
    name: String,
    slug: String,
}

fn catalog_from_classes(classes: Vec<GameClass>) -> ClassCatalog {
    classes
        .into_iter()
        .map(|class| {
            let specs = class
                .specs
                .into_iter()
                .map(|spec| {
                    (
                        spec.id,
                        SpecInfo {
                            name: spec.name,
                            slug: spec.slug,
                        },
                    )
                })
                .collect();
            (
                class.id,
                ClassInfo {
                    name: class.name,
                    slug: class.slug,
                    specs,
                },
            )
        })
        .collect()
}

impl WarcraftLogsClient {
    /// Create a client with its own connection pool.
    pub fn new(config: WarcraftLogsConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, config: WarcraftLogsConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &WarcraftLogsConfig {
        &self.config
    }

    /// Exchange the configured credentials for a bearer token.
    ///
    /// Fails with [`UpstreamError::Authentication`] before any network call
    /// when credentials are not configured.
    pub async fn access_token(&self) -> Result<AccessToken, UpstreamError> {
        let credentials = Credentials::from_options(
            self.config.client_id.as_deref(),
            self.config.client_secret.as_deref(),
        )?;
        request_token(&self.http, &self.config.token_url, &credentials).await
    }

    /// Fetch every member of a guild.
    pub async fn guild_roster(
        &self,
        token: &AccessToken,
        guild: &GuildCoordinates,
    ) -> Result<Vec<GuildMember>, UpstreamError> {
        let variables = serde_json::json!({
            "guildName": guild.guild_name,
            "serverRegion": guild.region,
            "serverSlug": guild.realm_slug,
        });

        let data: Option<GuildDataResponse> = graphql::execute(
            &self.http,
            &self.config.api_url,
            token,
            queries::GUILD_ROSTER,
            variables,
        )
        .await?;

        let guild_node = data
            .and_then(|d| d.guild_data)
            .and_then(|g| g.guild)
            .ok_or_else(|| UpstreamError::GuildNotFound {
                guild: guild.guild_name.clone(),
                realm: guild.realm_slug.clone(),
                region: guild.region.clone(),
            })?;

        Ok(guild_node.members.map(|page| page.data).unwrap_or_default())
    }

    /// Fetch the static class/spec catalog.
    pub async fn class_catalog(&self, token: &AccessToken) -> Result<ClassCatalog, UpstreamError> {
        let data: Option<GameDataResponse> = graphql::execute(
            &self.http,
            &self.config.api_url,
            token,
            queries::CLASS_CATALOG,
            serde_json::json!({}),
        )
        .await?;

        let classes = data
            .and_then(|d| d.game_data)
            .map(|g| g.classes)
            .unwrap_or_default();

        Ok(catalog_from_classes(classes))
    }

    /// Fetch and decode zone rankings for one character.
    ///
    /// Transport and GraphQL errors are returned; payload decode problems
    /// are not, they degrade to [`RankingResult::unknown`].
    pub async fn character_rankings(
        &self,
        token: &AccessToken,
        member: &GuildMember,
        fallback_region: &str,
        raid: RaidSelection,
    ) -> Result<RankingResult, UpstreamError> {
        let variables = serde_json::json!({
            "name": member.name,
            "serverSlug": member.server.slug,
            "serverRegion": member.region_slug(fallback_region),
            "zoneID": raid.zone_id,
            "difficulty": raid.difficulty,
        });

        let data: Option<CharacterDataResponse> = graphql::execute(
            &self.http,
            &self.config.api_url,
            token,
            queries::CHARACTER_RANKINGS,
            variables,
        )
        .await?;

        let node = data
            .and_then(|d| d.character_data)
            .and_then(|c| c.character);

        Ok(decode_character(node, &member.name))
    }
}
