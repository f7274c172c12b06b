//! Warcraft Logs v2 API client.
//!
//! Provides the OAuth client-credentials token exchange, a thin GraphQL
//! transport, and typed wrappers for the three queries the leaderboard
//! needs: guild roster, class/spec catalog and per-character zone
//! rankings.

pub mod auth;
pub mod client;
pub mod error;
pub mod graphql;
pub mod queries;
pub mod rankings;

pub use auth::{AccessToken, Credentials};
pub use client::{WarcraftLogsClient, WarcraftLogsConfig};
pub use error::UpstreamError;
