use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guildboard_pipeline::RefreshError;
use guildboard_warcraftlogs::UpstreamError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`UpstreamError`] for failures of a leaderboard refresh and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent `{ error, message, code }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failed refresh pass.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<RefreshError> for AppError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::Upstream(upstream) => AppError::Upstream(upstream),
            RefreshError::Task(join) => AppError::InternalError(join.to_string()),
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut graphql_errors = None;

        let (status, code, error, message) = match &self {
            AppError::Upstream(upstream) => match upstream {
                UpstreamError::Authentication(msg) => {
                    tracing::error!(error = %msg, "Upstream authentication failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "AUTHENTICATION_ERROR",
                        "Authentication failed",
                        msg.clone(),
                    )
                }
                UpstreamError::GuildNotFound { .. } => (
                    StatusCode::NOT_FOUND,
                    "GUILD_NOT_FOUND",
                    "Guild not found",
                    upstream.to_string(),
                ),
                UpstreamError::Protocol { message, errors } => {
                    tracing::error!(error = %message, "Upstream GraphQL error");
                    if !errors.is_null() {
                        graphql_errors = Some(errors.clone());
                    }
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "GRAPHQL_ERROR",
                        "GraphQL error",
                        message.clone(),
                    )
                }
                UpstreamError::Status { status, body } => {
                    tracing::error!(status, body = %body, "Upstream returned an error status");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "UPSTREAM_ERROR",
                        "API request failed",
                        format!("Upstream API returned HTTP {status}"),
                    )
                }
                UpstreamError::RankingParse(_) | UpstreamError::Network(_) => {
                    tracing::error!(error = %upstream, "Upstream request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "UPSTREAM_ERROR",
                        "API request failed",
                        "Upstream API request failed".to_string(),
                    )
                }
            },

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": error,
            "message": message,
            "code": code,
        });
        if let Some(errors) = graphql_errors {
            body["errors"] = errors;
        }

        (status, axum::Json(body)).into_response()
    }
}
