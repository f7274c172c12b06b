//! In-process leaderboard cache with single-flight refresh.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use guildboard_core::leaderboard::LeaderboardEntry;
use guildboard_core::types::Timestamp;
use guildboard_warcraftlogs::UpstreamError;
use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tokio::task::JoinError;
use tokio::time::Instant;

use crate::pass::{run_pass, PassConfig};
use crate::source::GuildDataSource;

/// Default validity window of a cached leaderboard.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Why [`LeaderboardCache::get`] produced no leaderboard.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The refresh task panicked or was aborted by the runtime.
    #[error("Refresh task failed: {0}")]
    Task(#[from] JoinError),
}

struct CacheRecord {
    entries: Arc<Vec<LeaderboardEntry>>,
    stored_at: Instant,
    computed_at: Timestamp,
    generation: u64,
}

/// Entries handed back by [`LeaderboardCache::get`].
#[derive(Debug, Clone)]
pub struct CachedLeaderboard {
    pub entries: Arc<Vec<LeaderboardEntry>>,
    /// `true` when no refresh pass ran for this call.
    pub from_cache: bool,
    pub computed_at: Timestamp,
}

/// Snapshot reported by the health endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub cached: bool,
    pub computed_at: Option<Timestamp>,
    pub entries: usize,
}

/// Holds the last leaderboard and refreshes it through a [`GuildDataSource`].
///
/// Only one refresh pass runs at a time. A caller that queued behind a pass
/// reuses its result instead of starting another one, even when it asked
/// for a forced refresh.
///
/// Passes run on their own task and hold the slot lock until they finish,
/// so a caller that goes away mid-pass does not cancel it.
pub struct LeaderboardCache {
    source: Arc<dyn GuildDataSource>,
    config: Arc<PassConfig>,
    ttl: Duration,
    slot: Arc<Mutex<Option<CacheRecord>>>,
    generation: Arc<AtomicU64>,
    status: Arc<RwLock<CacheStatus>>,
}

impl LeaderboardCache {
    pub fn new(source: Arc<dyn GuildDataSource>, config: PassConfig, ttl: Duration) -> Self {
        Self {
            source,
            config: Arc::new(config),
            ttl,
            slot: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
            status: Arc::new(RwLock::new(CacheStatus::default())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached leaderboard, refreshing it when it is missing,
    /// expired or `force_refresh` is set.
    ///
    /// A failed refresh leaves the previous record in place.
    pub async fn get(&self, force_refresh: bool) -> Result<CachedLeaderboard, RefreshError> {
        let seen = self.generation.load(Ordering::Acquire);
        let slot = Arc::clone(&self.slot).lock_owned().await;

        if let Some(record) = slot.as_ref() {
            if record.generation > seen {
                tracing::debug!("Reusing leaderboard refreshed while waiting");
                return Ok(CachedLeaderboard {
                    entries: Arc::clone(&record.entries),
                    from_cache: false,
                    computed_at: record.computed_at,
                });
            }
            if !force_refresh && record.stored_at.elapsed() < self.ttl {
                tracing::debug!(computed_at = %record.computed_at, "Serving cached leaderboard");
                return Ok(CachedLeaderboard {
                    entries: Arc::clone(&record.entries),
                    from_cache: true,
                    computed_at: record.computed_at,
                });
            }
        }

        if force_refresh {
            tracing::info!("Forced leaderboard refresh");
        }

        let task = tokio::spawn(refresh(
            slot,
            Arc::clone(&self.source),
            Arc::clone(&self.config),
            Arc::clone(&self.generation),
            Arc::clone(&self.status),
        ));
        Ok(task.await??)
    }

    /// Current cache state. Does not wait for an in-flight refresh.
    pub async fn status(&self) -> CacheStatus {
        self.status.read().await.clone()
    }
}

/// Run one pass and store its result. Holds `slot` for the whole pass.
async fn refresh(
    mut slot: OwnedMutexGuard<Option<CacheRecord>>,
    source: Arc<dyn GuildDataSource>,
    config: Arc<PassConfig>,
    generation: Arc<AtomicU64>,
    status: Arc<RwLock<CacheStatus>>,
) -> Result<CachedLeaderboard, UpstreamError> {
    let entries = Arc::new(run_pass(source.as_ref(), &config).await?);
    let generation = generation.fetch_add(1, Ordering::AcqRel) + 1;
    let computed_at = chrono::Utc::now();

    *status.write().await = CacheStatus {
        cached: true,
        computed_at: Some(computed_at),
        entries: entries.len(),
    };
    *slot = Some(CacheRecord {
        entries: Arc::clone(&entries),
        stored_at: Instant::now(),
        computed_at,
        generation,
    });

    Ok(CachedLeaderboard {
        entries,
        from_cache: false,
        computed_at,
    })
}
