//! Minimal GraphQL-over-HTTP transport.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::auth::AccessToken;
use crate::error::UpstreamError;

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl<T> GraphQlResponse<T> {
    /// Split the envelope into its data, failing on a non-empty `errors`.
    pub fn into_data(self) -> Result<Option<T>, UpstreamError> {
        match self.errors {
            Some(errors) if !is_empty_errors(&errors) => {
                let message = first_error_message(&errors)
                    .unwrap_or("GraphQL error")
                    .to_string();
                Err(UpstreamError::Protocol { message, errors })
            }
            _ => Ok(self.data),
        }
    }
}

/// Field deserializer that reads an explicit `null` as `T::default()`.
///
/// Use together with `#[serde(default)]` so a missing field and a `null`
/// one decode the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_empty_errors(errors: &serde_json::Value) -> bool {
    match errors {
        serde_json::Value::Null => true,
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn first_error_message(errors: &serde_json::Value) -> Option<&str> {
    errors.get(0)?.get("message")?.as_str()
}

/// Execute one GraphQL query with bearer auth.
///
/// Returns the `data` member, `None` when the server sent `"data": null`
/// without errors.
pub async fn execute<T: DeserializeOwned>(
    http: &reqwest::Client,
    api_url: &str,
    token: &AccessToken,
    query: &str,
    variables: serde_json::Value,
) -> Result<Option<T>, UpstreamError> {
    let body = serde_json::json!({
        "query": query,
        "variables": variables,
    });

    let response = http
        .post(api_url)
        .bearer_auth(token.as_str())
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await?;
    let envelope: GraphQlResponse<T> =
        serde_json::from_str(&text).map_err(UpstreamError::malformed)?;
    envelope.into_data()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse(json: serde_json::Value) -> GraphQlResponse<serde_json::Value> {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn data_passes_through() {
        let envelope = parse(serde_json::json!({ "data": { "ok": true } }));
        let data = envelope.into_data().unwrap().unwrap();
        assert_eq!(data["ok"], true);
    }

    #[test]
    fn null_data_is_none() {
        let envelope = parse(serde_json::json!({ "data": null }));
        assert!(envelope.into_data().unwrap().is_none());
    }

    #[test]
    fn errors_become_protocol_error_with_raw_payload() {
        let envelope = parse(serde_json::json!({
            "data": null,
            "errors": [{ "message": "Unknown argument zoneID" }]
        }));
        let err = envelope.into_data().unwrap_err();
        assert_matches!(&err, UpstreamError::Protocol { message, errors } => {
            assert_eq!(message, "Unknown argument zoneID");
            assert_eq!(errors[0]["message"], "Unknown argument zoneID");
        });
    }

    #[test]
    fn empty_errors_array_is_ignored() {
        let envelope = parse(serde_json::json!({ "data": { "x": 1 }, "errors": [] }));
        assert!(envelope.into_data().unwrap().is_some());
    }

    #[derive(Debug, Deserialize)]
    struct Page {
        #[serde(default, deserialize_with = "null_as_default")]
        items: Vec<u32>,
    }

    #[test]
    fn null_list_reads_as_empty() {
        let page: Page = serde_json::from_value(serde_json::json!({ "items": null })).unwrap();
        assert!(page.items.is_empty());

        let page: Page = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(page.items.is_empty());

        let page: Page = serde_json::from_value(serde_json::json!({ "items": [3] })).unwrap();
        assert_eq!(page.items, vec![3]);
    }

    #[test]
    fn errors_without_message_get_generic_text() {
        let envelope = parse(serde_json::json!({ "errors": [{ "code": 7 }] }));
        assert_matches!(
            envelope.into_data(),
            Err(UpstreamError::Protocol { message, .. }) if message == "GraphQL error"
        );
    }
}
