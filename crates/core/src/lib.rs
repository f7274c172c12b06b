//! Domain types and pure logic for the guild leaderboard.
//!
//! Nothing in this crate performs I/O. The upstream client produces
//! [`roster::GuildMember`], [`catalog::ClassCatalog`] and
//! [`ranking::RankingResult`] values, and [`leaderboard::aggregate`] joins
//! them into the ranked [`leaderboard::LeaderboardEntry`] list.

pub mod catalog;
pub mod leaderboard;
pub mod naming;
pub mod ranking;
pub mod roster;
pub mod types;
