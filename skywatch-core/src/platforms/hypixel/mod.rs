// File: src/platforms/hypixel/mod.rs

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use skywatch_common::models::{PlayerUuid, StatusPayload};
use skywatch_common::traits::StatusApi;

use crate::Error;
use crate::http::{DefaultHttpClient, HttpClient};

pub const DEFAULT_API_BASE: &str = "https://api.hypixel.net";

/// Calls `GET <base>/status?key=..&uuid=..`. One request per call, no retry.
pub struct HypixelClient {
    http: Arc<dyn HttpClient<Error = Error>>,
    api_key: String,
    base_url: Url,
}

impl HypixelClient {
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, Error> {
        Self::with_http_client(Arc::new(DefaultHttpClient::new()), api_key, base_url)
    }

    pub fn with_http_client(
        http: Arc<dyn HttpClient<Error = Error>>,
        api_key: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid Hypixel API base '{base_url}': {e}")))?;
        // `join` replaces the last path segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url,
        })
    }

    pub fn status_url(&self, uuid: &PlayerUuid) -> Result<Url, Error> {
        let mut url = self
            .base_url
            .join("status")
            .map_err(|e| Error::Parse(format!("cannot build status URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("uuid", uuid.as_str());
        Ok(url)
    }
}

#[async_trait]
impl StatusApi for HypixelClient {
    async fn fetch_status(&self, uuid: &PlayerUuid) -> Result<StatusPayload, Error> {
        let url = self.status_url(uuid)?;
        debug!("Fetching Hypixel status for {}", uuid);
        let body = self.http.get(url.into()).await?;
        StatusPayload::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockHttpClient;
    use mockall::predicate::eq;

    const STATUS_URL: &str = "https://api.hypixel.net/status?key=secret&uuid=abc123";

    fn client_with(mock: MockHttpClient) -> HypixelClient {
        HypixelClient::with_http_client(Arc::new(mock), "secret", DEFAULT_API_BASE).unwrap()
    }

    #[test]
    fn builds_status_url_with_key_and_uuid() {
        let client = client_with(MockHttpClient::new());
        let url = client.status_url(&PlayerUuid::new("abc123")).unwrap();
        assert_eq!(url.as_str(), STATUS_URL);
    }

    #[test]
    fn keeps_path_prefix_of_custom_base() {
        let client = HypixelClient::with_http_client(
            Arc::new(MockHttpClient::new()),
            "k",
            "http://127.0.0.1:8080/v2/",
        )
        .unwrap();
        let url = client.status_url(&PlayerUuid::new("u")).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/v2/status?key=k&uuid=u");
    }

    #[test]
    fn base_without_trailing_slash_keeps_last_segment() {
        let client = HypixelClient::with_http_client(
            Arc::new(MockHttpClient::new()),
            "k",
            "http://127.0.0.1:8080/v2",
        )
        .unwrap();
        let url = client.status_url(&PlayerUuid::new("u")).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/v2/status?key=k&uuid=u");
    }

    #[test]
    fn rejects_unparsable_base() {
        let result = HypixelClient::with_http_client(Arc::new(MockHttpClient::new()), "k", "not a url");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn decodes_online_status() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .with(eq(STATUS_URL.to_string()))
            .times(1)
            .returning(|_| {
                Ok(r#"{"success":true,"session":{"online":true,"gameType":"SKYBLOCK"}}"#.to_string())
            });

        let payload = client_with(mock)
            .fetch_status(&PlayerUuid::new("abc123"))
            .await
            .unwrap();
        assert_eq!(payload, StatusPayload::online("SKYBLOCK"));
    }

    #[tokio::test]
    async fn invalid_key_body_is_a_payload_not_an_error() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .times(1)
            .returning(|_| Ok(r#"{"success":false,"cause":"Invalid API key"}"#.to_string()));

        let payload = client_with(mock)
            .fetch_status(&PlayerUuid::new("abc123"))
            .await
            .unwrap();
        assert!(payload.is_invalid_api_key());
    }

    #[tokio::test]
    async fn non_json_body_is_a_transport_error() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .times(1)
            .returning(|_| Ok("<html>cloudflare</html>".to_string()));

        let err = client_with(mock)
            .fetch_status(&PlayerUuid::new("abc123"))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
