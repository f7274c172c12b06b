//! Leaderboard refresh pipeline.
//!
//! Wires the upstream data source, the batched ranking fetch and the pure
//! aggregation from `guildboard_core` into one refresh pass, and fronts it
//! with a single-flight result cache.

pub mod cache;
pub mod mock;
pub mod pass;
pub mod policy;
pub mod source;

pub use cache::{CacheStatus, CachedLeaderboard, LeaderboardCache, RefreshError};
pub use mock::MockSource;
pub use pass::{run_pass, PassConfig};
pub use policy::{run_batched, BatchPolicy};
pub use source::GuildDataSource;
