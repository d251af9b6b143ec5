//! HTTP client for the conversational-agent platform
//!
//! Every call is a single create-or-update `PUT` keyed by object name; the
//! platform decides whether that creates a new object or overwrites one.
//! There is no retry: a failed call is reported once and the caller moves on.

use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;

use super::payload::{EntityPayload, IntentPayload};
use crate::core::config::ApiConfig;
use crate::core::error::{RequestError, Result, SyncError};

/// Remote operations the updaters need
///
/// Implemented by [`AgentClient`] for the real platform; tests substitute a
/// recording fake.
#[allow(async_fn_in_trait)]
pub trait AgentApi {
    /// Create or overwrite the intent named `payload.name`
    async fn upsert_intent(&self, payload: &IntentPayload) -> std::result::Result<Value, RequestError>;

    /// Create or overwrite the entity named `payload.name`
    async fn upsert_entity(&self, payload: &EntityPayload) -> std::result::Result<Value, RequestError>;
}

/// Authenticated client for one platform agent
pub struct AgentClient {
    client: Client,
    base_url: Url,
    token: String,
    api_version: Option<String>,
}

impl AgentClient {
    /// Create a client with explicit settings
    pub fn new(base_url: &str, token: String, api_version: Option<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SyncError::ConfigError(format!("invalid API URL {:?}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SyncError::ConfigError(format!(
                "API URL {} cannot have a path",
                base_url
            )));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
            token,
            api_version,
        })
    }

    /// Create a client from resolved config; fails when no token is set
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let token = config.require_token()?.to_string();
        Self::new(&config.base_url, token, config.api_version.clone())
    }

    /// `{base_url}/{collection}/{name}` with the version query, if any
    fn endpoint(&self, collection: &str, name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(collection).push(name);
        }
        if let Some(version) = &self.api_version {
            url.query_pairs_mut().append_pair("v", version);
        }
        url
    }

    async fn put_json<T: Serialize>(
        &self,
        url: Url,
        body: &T,
    ) -> std::result::Result<Value, RequestError> {
        tracing::debug!(%url, "PUT");
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        decode_body(&text)
    }
}

impl AgentApi for AgentClient {
    async fn upsert_intent(&self, payload: &IntentPayload) -> std::result::Result<Value, RequestError> {
        let url = self.endpoint("intents", &payload.name);
        self.put_json(url, payload).await
    }

    async fn upsert_entity(&self, payload: &EntityPayload) -> std::result::Result<Value, RequestError> {
        let url = self.endpoint("entities", &payload.name);
        self.put_json(url, payload).await
    }
}

/// Success bodies are passed through unchanged; an empty body is `null`
fn decode_body(text: &str) -> std::result::Result<Value, RequestError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AgentClient::new(
            "https://api.example.com/v1",
            "test-token".into(),
            Some("20150910".into()),
        )
        .unwrap();
        assert_eq!(client.token, "test-token");
        assert_eq!(client.base_url.as_str(), "https://api.example.com/v1");
    }

    #[test]
    fn test_endpoint_escapes_name_and_adds_version() {
        let client = AgentClient::new(
            "https://api.example.com/v1/",
            "t".into(),
            Some("20150910".into()),
        )
        .unwrap();
        let url = client.endpoint("intents", "order pizza");
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1/intents/order%20pizza?v=20150910"
        );
    }

    #[test]
    fn test_endpoint_without_version() {
        let client = AgentClient::new("https://api.example.com/v1", "t".into(), None).unwrap();
        assert_eq!(
            client.endpoint("entities", "colors").as_str(),
            "https://api.example.com/v1/entities/colors"
        );
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(AgentClient::new("not a url", "t".into(), None).is_err());
        assert!(AgentClient::new("mailto:someone@example.com", "t".into(), None).is_err());
    }

    #[test]
    fn test_from_config_requires_token() {
        let config = ApiConfig::default();
        assert!(matches!(
            AgentClient::from_config(&config),
            Err(SyncError::ConfigError(_))
        ));
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body("").unwrap(), Value::Null);
        assert_eq!(
            decode_body(r#"{"id": "abc", "status": {"code": 200}}"#).unwrap()["id"],
            "abc"
        );
        assert!(matches!(decode_body("<html>"), Err(RequestError::Decode(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_is_request_error() {
        // Port 9 (discard) on localhost is not expected to accept connections
        let client = AgentClient::new("http://127.0.0.1:9/v1", "t".into(), None).unwrap();
        let payload = EntityPayload {
            name: "colors".into(),
            entries: Vec::new(),
        };
        let err = client.upsert_entity(&payload).await.unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
    }
}
