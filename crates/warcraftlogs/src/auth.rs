//! OAuth client-credentials token exchange.

use std::fmt;

use serde::Deserialize;

use crate::error::UpstreamError;

/// Client id/secret pair for the token endpoint.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    /// Build credentials from optional configuration values.
    ///
    /// Missing or blank values fail with [`UpstreamError::Authentication`]
    /// so that no network call is made without credentials.
    pub fn from_options(
        client_id: Option<&str>,
        client_secret: Option<&str>,
    ) -> Result<Self, UpstreamError> {
        let client_id = client_id.map(str::trim).filter(|s| !s.is_empty());
        let client_secret = client_secret.map(str::trim).filter(|s| !s.is_empty());

        match (client_id, client_secret) {
            (Some(id), Some(secret)) => Ok(Self {
                client_id: id.to_string(),
                client_secret: secret.to_string(),
            }),
            _ => Err(UpstreamError::Authentication(
                "Missing API credentials: configure WARCRAFT_LOGS_CLIENT_ID and \
                 WARCRAFT_LOGS_CLIENT_SECRET"
                    .to_string(),
            )),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Bearer token valid for the rest of one leaderboard pass.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Exchange credentials for a bearer token.
///
/// Sends `POST {token_url}` with `grant_type=client_credentials` and HTTP
/// basic auth. Any non-2xx answer is treated as rejected credentials.
pub async fn request_token(
    http: &reqwest::Client,
    token_url: &str,
    credentials: &Credentials,
) -> Result<AccessToken, UpstreamError> {
    let response = http
        .post(token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        tracing::warn!(
            status = status.as_u16(),
            body = %body,
            "Token endpoint rejected credentials"
        );
        return Err(UpstreamError::Authentication(format!(
            "Token endpoint returned HTTP {}",
            status.as_u16()
        )));
    }

    let body = response.text().await?;
    let parsed: TokenResponse = serde_json::from_str(&body).map_err(UpstreamError::malformed)?;

    match parsed.access_token.filter(|t| !t.is_empty()) {
        Some(token) => Ok(AccessToken::new(token)),
        None => Err(UpstreamError::Authentication(
            "Token endpoint returned no access token".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn both_values_present() {
        let creds = Credentials::from_options(Some("id"), Some("secret")).unwrap();
        assert_eq!(creds.client_id, "id");
        assert_eq!(creds.client_secret, "secret");
    }

    #[test]
    fn missing_id_is_authentication_error() {
        let err = Credentials::from_options(None, Some("secret")).unwrap_err();
        assert_matches!(err, UpstreamError::Authentication(_));
    }

    #[test]
    fn blank_secret_is_authentication_error() {
        let err = Credentials::from_options(Some("id"), Some("   ")).unwrap_err();
        assert_matches!(err, UpstreamError::Authentication(_));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = Credentials::from_options(Some("id"), Some("hunter2")).unwrap();
        assert!(!format!("{creds:?}").contains("hunter2"));
        let token = AccessToken::new("abc.def");
        assert!(!format!("{token:?}").contains("abc.def"));
    }
}
