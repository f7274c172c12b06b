use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use guildboard_core::roster::{GuildCoordinates, RaidSelection};
use guildboard_pipeline::policy::BatchPolicy;
use guildboard_pipeline::PassConfig;
use guildboard_warcraftlogs::client::{DEFAULT_API_URL, DEFAULT_TOKEN_URL};
use guildboard_warcraftlogs::WarcraftLogsConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`). Covers a full
    /// uncached refresh pass.
    pub request_timeout_secs: u64,
    /// Guild, raid and upstream settings.
    pub guild: GuildConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                      |
    ///
    /// See [`GuildConfig::from_env`] for the guild settings.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&lookup, "PORT", "3000");

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "120");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            guild: GuildConfig::from_lookup(&lookup),
        }
    }
}

/// Which guild to rank, against which raid, and how to reach the upstream.
#[derive(Debug, Clone)]
pub struct GuildConfig {
    pub guild_name: String,
    /// Display name; the upstream server slug is derived from it.
    pub realm_name: String,
    pub region: String,
    pub zone_id: i64,
    pub difficulty: i64,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_url: String,
    pub api_url: String,
    pub max_characters: usize,
    pub batch_delay_ms: u64,
    pub cache_ttl_minutes: u64,
    /// Serve generated data instead of calling the upstream.
    pub use_mock_data: bool,
}

impl GuildConfig {
    /// Load guild settings from environment variables with defaults.
    ///
    /// | Env Var                       | Default                                      |
    /// |-------------------------------|----------------------------------------------|
    /// | `GUILD_NAME`                  | `Your Guild Name`                            |
    /// | `REALM_NAME`                  | `Your Realm`                                 |
    /// | `REGION`                      | `us`                                         |
    /// | `LATEST_RAID_ZONE_ID`         | `39`                                         |
    /// | `RAID_DIFFICULTY`             | `4`                                          |
    /// | `WARCRAFT_LOGS_CLIENT_ID`     | unset                                        |
    /// | `WARCRAFT_LOGS_CLIENT_SECRET` | unset                                        |
    /// | `WARCRAFT_LOGS_TOKEN_URL`     | `https://www.warcraftlogs.com/oauth/token`   |
    /// | `WARCRAFT_LOGS_API_URL`       | `https://www.warcraftlogs.com/api/v2/client` |
    /// | `MAX_CHARACTERS`              | `25`                                         |
    /// | `BATCH_DELAY_MS`              | `500`                                        |
    /// | `CACHE_TTL_MINUTES`           | `30`                                         |
    /// | `USE_MOCK_DATA`               | `false`                                      |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let secret = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            guild_name: text("GUILD_NAME", "Your Guild Name"),
            realm_name: text("REALM_NAME", "Your Realm"),
            region: text("REGION", "us"),
            zone_id: parse_var(&lookup, "LATEST_RAID_ZONE_ID", "39"),
            difficulty: parse_var(&lookup, "RAID_DIFFICULTY", "4"),
            client_id: secret("WARCRAFT_LOGS_CLIENT_ID"),
            client_secret: secret("WARCRAFT_LOGS_CLIENT_SECRET"),
            token_url: text("WARCRAFT_LOGS_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: text("WARCRAFT_LOGS_API_URL", DEFAULT_API_URL),
            max_characters: parse_var(&lookup, "MAX_CHARACTERS", "25"),
            batch_delay_ms: parse_var(&lookup, "BATCH_DELAY_MS", "500"),
            cache_ttl_minutes: parse_var(&lookup, "CACHE_TTL_MINUTES", "30"),
            use_mock_data: lookup("USE_MOCK_DATA").is_some_and(|v| is_truthy(&v)),
        }
    }

    pub fn coordinates(&self) -> GuildCoordinates {
        GuildCoordinates::new(&self.guild_name, &self.realm_name, &self.region)
    }

    pub fn raid(&self) -> RaidSelection {
        RaidSelection {
            zone_id: self.zone_id,
            difficulty: self.difficulty,
        }
    }

    pub fn pass_config(&self) -> PassConfig {
        PassConfig {
            guild: self.coordinates(),
            raid: self.raid(),
            max_characters: self.max_characters,
            batch: BatchPolicy::with_delay(Duration::from_millis(self.batch_delay_ms)),
        }
    }

    pub fn warcraftlogs(&self) -> WarcraftLogsConfig {
        WarcraftLogsConfig {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            token_url: self.token_url.clone(),
            api_url: self.api_url.clone(),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_minutes * 60)
    }
}

/// Parse a variable or its default, panicking on malformed values so that
/// misconfiguration fails at startup.
fn parse_var<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .unwrap_or_else(|e| panic!("{key} must be a valid {}: {e}", std::any::type_name::<T>()))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.request_timeout_secs, 120);

        let guild = config.guild;
        assert_eq!(guild.guild_name, "Your Guild Name");
        assert_eq!(guild.realm_name, "Your Realm");
        assert_eq!(guild.region, "us");
        assert_eq!(guild.raid(), RaidSelection { zone_id: 39, difficulty: 4 });
        assert!(guild.client_id.is_none());
        assert_eq!(guild.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(guild.max_characters, 25);
        assert_eq!(guild.cache_ttl(), Duration::from_secs(1800));
        assert!(!guild.use_mock_data);
    }

    #[test]
    fn overrides_are_applied() {
        let guild = GuildConfig::from_lookup(lookup_from(&[
            ("GUILD_NAME", "Roddan"),
            ("REALM_NAME", "Argent Dawn"),
            ("REGION", "eu"),
            ("RAID_DIFFICULTY", "5"),
            ("BATCH_DELAY_MS", "0"),
            ("USE_MOCK_DATA", "TRUE"),
        ]));

        let pass = guild.pass_config();
        assert_eq!(pass.guild.realm_slug, "argent-dawn");
        assert_eq!(pass.raid.difficulty, 5);
        assert_eq!(pass.batch.inter_batch_delay, Duration::ZERO);
        assert!(guild.use_mock_data);
    }

    #[test]
    fn blank_credentials_count_as_unset() {
        let guild = GuildConfig::from_lookup(lookup_from(&[
            ("WARCRAFT_LOGS_CLIENT_ID", "  "),
            ("WARCRAFT_LOGS_CLIENT_SECRET", "s3cret"),
        ]));

        assert!(guild.client_id.is_none());
        assert_eq!(guild.warcraftlogs().client_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn comma_separated_cors_origins() {
        let config = ServerConfig::from_lookup(lookup_from(&[(
            "CORS_ORIGINS",
            "http://a.test, http://b.test,,",
        )]));
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    #[should_panic(expected = "MAX_CHARACTERS must be a valid")]
    fn malformed_number_panics() {
        GuildConfig::from_lookup(lookup_from(&[("MAX_CHARACTERS", "lots")]));
    }
}
