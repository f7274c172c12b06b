#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use guildboard_api::config::{GuildConfig, ServerConfig};
use guildboard_api::router::build_app_router;
use guildboard_api::state::AppState;
use guildboard_core::catalog::{ClassCatalog, ClassInfo, SpecInfo};
use guildboard_core::ranking::{BestPerformance, Progress, RankingResult};
use guildboard_core::roster::{GuildCoordinates, GuildMember, RaidSelection, Server};
use guildboard_pipeline::GuildDataSource;
use guildboard_warcraftlogs::client::{DEFAULT_API_URL, DEFAULT_TOKEN_URL};
use guildboard_warcraftlogs::{AccessToken, UpstreamError};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// no inter-batch delay and a 30-minute cache.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        guild: GuildConfig {
            guild_name: "Roddan".to_string(),
            realm_name: "Argent Dawn".to_string(),
            region: "eu".to_string(),
            zone_id: 39,
            difficulty: 4,
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            max_characters: 25,
            batch_delay_ms: 0,
            cache_ttl_minutes: 30,
            use_mock_data: false,
        },
    }
}

/// Build the full application router over the given source.
///
/// Uses the same [`build_app_router`] as `main.rs`, so integration tests
/// exercise the production middleware stack.
pub fn build_test_app(source: Arc<dyn GuildDataSource>) -> Router {
    let config = test_config();
    let state = AppState::new(config.clone(), source);
    build_app_router(state, &config)
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Scripted data source
// ---------------------------------------------------------------------------

/// How the scripted source fails, if at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Failure {
    #[default]
    None,
    Authentication,
    GuildNotFound,
    GraphQl,
}

/// In-memory [`GuildDataSource`] that counts upstream calls.
///
/// Serves a roster whose first member is the "Foo" Frost mage.
pub struct ScriptedSource {
    pub members: Vec<GuildMember>,
    pub failure: Failure,
    pub token_calls: AtomicUsize,
    pub ranking_calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(members: Vec<GuildMember>) -> Arc<Self> {
        Arc::new(Self {
            members,
            failure: Failure::None,
            token_calls: AtomicUsize::new(0),
            ranking_calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(failure: Failure) -> Arc<Self> {
        Arc::new(Self {
            members: Vec::new(),
            failure,
            token_calls: AtomicUsize::new(0),
            ranking_calls: AtomicUsize::new(0),
        })
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn ranking_calls(&self) -> usize {
        self.ranking_calls.load(Ordering::SeqCst)
    }
}

pub fn member(id: i64, name: &str, class_id: i64) -> GuildMember {
    GuildMember {
        id,
        name: name.to_string(),
        class_id,
        hidden: false,
        server: Server {
            slug: "argent-dawn".to_string(),
            name: "Argent Dawn".to_string(),
            region: None,
        },
    }
}

/// Foo, the Frost mage, plus `extra` filler members in roster order.
pub fn guild_roster(extra: i64) -> Vec<GuildMember> {
    let mut roster = vec![member(1, "Foo", 8)];
    roster.extend((0..extra).map(|i| member(100 + i, &format!("Alt{i}"), 8)));
    roster
}

fn foo_ranking() -> RankingResult {
    RankingResult {
        score: 88,
        spec: "Frost".to_string(),
        spec_id: Some(64),
        progress: Progress {
            kills: 7,
            total_bosses: 9,
        },
        boss_scores: [("Boss1".to_string(), 88)].into_iter().collect(),
        best_performances: vec![BestPerformance {
            boss: "Boss1".to_string(),
            score: 88,
            report_id: Some("r1".to_string()),
            fight_id: Some(2),
        }],
        item_level: 489.0,
    }
}

#[async_trait]
impl GuildDataSource for ScriptedSource {
    async fn access_token(&self) -> Result<AccessToken, UpstreamError> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        if self.failure == Failure::Authentication {
            return Err(UpstreamError::Authentication(
                "Missing API credentials".to_string(),
            ));
        }
        Ok(AccessToken::new("scripted"))
    }

    async fn roster(
        &self,
        _token: &AccessToken,
        guild: &GuildCoordinates,
    ) -> Result<Vec<GuildMember>, UpstreamError> {
        match self.failure {
            Failure::GuildNotFound => Err(UpstreamError::GuildNotFound {
                guild: guild.guild_name.clone(),
                realm: guild.realm_slug.clone(),
                region: guild.region.clone(),
            }),
            Failure::GraphQl => Err(UpstreamError::Protocol {
                message: "Too many requests".to_string(),
                errors: serde_json::json!([{ "message": "Too many requests" }]),
            }),
            _ => Ok(self.members.clone()),
        }
    }

    async fn catalog(&self, _token: &AccessToken) -> Result<ClassCatalog, UpstreamError> {
        let mut catalog = ClassCatalog::empty();
        catalog.insert(
            8,
            ClassInfo {
                name: "Mage".to_string(),
                slug: "mage".to_string(),
                specs: [(
                    64,
                    SpecInfo {
                        name: "Frost".to_string(),
                        slug: "frost".to_string(),
                    },
                )]
                .into(),
            },
        );
        Ok(catalog)
    }

    async fn character_rankings(
        &self,
        _token: &AccessToken,
        member: &GuildMember,
        _fallback_region: &str,
        _raid: RaidSelection,
    ) -> Result<RankingResult, UpstreamError> {
        self.ranking_calls.fetch_add(1, Ordering::SeqCst);
        if member.name == "Foo" {
            Ok(foo_ranking())
        } else {
            Ok(RankingResult::unknown())
        }
    }
}
