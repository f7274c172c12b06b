/// Errors from talking to the Warcraft Logs API.
///
/// Token and roster failures abort a leaderboard pass. Catalog and
/// per-character failures are recovered by the caller.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Credentials are missing, or the token endpoint refused them.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The guild query returned no guild for the given coordinates.
    #[error("Could not find guild \"{guild}\" on {realm}-{region}")]
    GuildNotFound {
        guild: String,
        realm: String,
        region: String,
    },

    /// The API reported a GraphQL-level error, or answered with a body
    /// that does not match the expected shape.
    #[error("Upstream API error: {message}")]
    Protocol {
        message: String,
        /// Raw `errors` array from the response, `null` for shape mismatches.
        errors: serde_json::Value,
    },

    /// An embedded ranking payload could not be decoded.
    #[error("Failed to parse ranking data: {0}")]
    RankingParse(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl UpstreamError {
    /// Build a [`UpstreamError::Protocol`] for a body that failed to decode.
    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::Protocol {
            message: format!("Malformed response: {err}"),
            errors: serde_json::Value::Null,
        }
    }
}
