//! song.link HTTP client
//!
//! Resolves any supported music URL into the links for every platform the
//! service knows about. See: https://odesli.co (API v1-alpha.1)
//!
//! ## Proxying
//!
//! Browser front ends reach the API through an AllOrigins-style proxy to
//! avoid CORS. When `proxy_url` is configured we do the same: the full
//! lookup URL is passed as the proxy's `url` parameter and the real body is
//! unwrapped from the envelope's `contents` string.
//!
//! The client never retries and sets no timeout; both are caller policy.

use super::domain::{ResolutionError, SmartlinkData};
use super::{dto, normalize};
use crate::config::ResolverConfig;

/// Public song.link lookup endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.song.link/v1-alpha.1/links";

/// Stands in for the API key in logged URLs
const REDACTED: &str = "REDACTED";

/// User agent sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// song.link API client
pub struct SongLinkClient {
    http_client: reqwest::Client,
    base_url: String,
    user_country: Option<String>,
    api_key: Option<String>,
    proxy_url: Option<String>,
}

impl SongLinkClient {
    /// Create a client talking directly to the public endpoint
    pub fn new() -> Result<Self, ResolutionError> {
        Self::from_config(&ResolverConfig::default())
    }

    /// Create a client from the `[resolver]` config section
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ResolutionError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ResolutionError::NetworkFailure(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_country: config.user_country.clone().filter(|c| !c.is_empty()),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            proxy_url: config.proxy_url.clone().filter(|p| !p.is_empty()),
        })
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::from_config(&ResolverConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
        .expect("Failed to build HTTP client")
    }

    /// Resolve a music URL into canonical smartlink data
    pub async fn resolve(&self, url: &str) -> Result<SmartlinkData, ResolutionError> {
        let response = self.send_links_request(url).await?;
        let data = normalize::normalize(&response)?;

        tracing::debug!(
            target: "smartlink::resolver",
            entity = %response.entity_unique_id,
            platforms = data.platforms.len(),
            "Resolved music link"
        );
        Ok(data)
    }

    /// Lookup URL on the song.link API itself
    fn lookup_url(&self, url: &str) -> String {
        self.build_lookup_url(url, self.api_key.as_deref())
    }

    fn build_lookup_url(&self, url: &str, key: Option<&str>) -> String {
        let mut lookup = format!("{}?url={}", self.base_url, urlencoding::encode(url));
        if let Some(ref country) = self.user_country {
            lookup.push_str("&userCountry=");
            lookup.push_str(&urlencoding::encode(country));
        }
        if let Some(key) = key {
            lookup.push_str("&key=");
            lookup.push_str(&urlencoding::encode(key));
        }
        lookup
    }

    /// URL actually requested, wrapped by the proxy when one is configured
    fn request_url(&self, url: &str) -> String {
        self.wrap_in_proxy(self.lookup_url(url))
    }

    /// [`Self::request_url`] with the API key masked, for logging
    fn redacted_request_url(&self, url: &str) -> String {
        let key = self.api_key.as_ref().map(|_| REDACTED);
        self.wrap_in_proxy(self.build_lookup_url(url, key))
    }

    fn wrap_in_proxy(&self, lookup: String) -> String {
        match self.proxy_url {
            Some(ref proxy) => format!("{}?url={}", proxy, urlencoding::encode(&lookup)),
            None => lookup,
        }
    }

    /// Send the HTTP request and decode the response
    async fn send_links_request(&self, url: &str) -> Result<dto::LinksResponse, ResolutionError> {
        let request_url = self.request_url(url);
        tracing::debug!(
            target: "smartlink::resolver",
            proxied = self.proxy_url.is_some(),
            "GET {}",
            self.redacted_request_url(url)
        );

        let response = self
            .http_client
            .get(&request_url)
            .send()
            .await
            .map_err(|e| ResolutionError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ResolutionError::NetworkFailure(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(target: "smartlink::resolver", status = status.as_u16(), "Resolution service error");
            return Err(service_error(
                status.as_u16(),
                status.canonical_reason(),
                &body,
            ));
        }

        let body = if self.proxy_url.is_some() {
            unwrap_envelope(&body)?
        } else {
            body
        };
        decode_links(&body)
    }
}

/// Extract the upstream body from a proxy envelope, surfacing the upstream status.
fn unwrap_envelope(body: &str) -> Result<String, ResolutionError> {
    let envelope: dto::ProxyEnvelope = serde_json::from_str(body)
        .map_err(|e| ResolutionError::MalformedResponse(format!("proxy envelope: {e}")))?;

    let contents = envelope.contents.unwrap_or_default();
    if let Some(code) = envelope.status.and_then(|s| s.http_code)
        && !(200..300).contains(&code)
    {
        return Err(service_error(code, None, &contents));
    }
    if contents.is_empty() {
        return Err(ResolutionError::MalformedResponse(
            "proxy envelope has no contents".to_string(),
        ));
    }
    Ok(contents)
}

fn decode_links(body: &str) -> Result<dto::LinksResponse, ResolutionError> {
    serde_json::from_str(body).map_err(|e| ResolutionError::MalformedResponse(e.to_string()))
}

fn service_error(status: u16, reason: Option<&str>, body: &str) -> ResolutionError {
    let snippet: String = body.chars().take(200).collect();
    let message = match reason {
        Some(reason) if snippet.is_empty() => reason.to_string(),
        Some(reason) => format!("{reason} - {snippet}"),
        None => snippet,
    };
    ResolutionError::ServiceError { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{SONG_BAND_RESPONSE, closed_port_url, serve_once};

    #[test]
    fn test_client_creation() {
        let client = SongLinkClient::new().unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert!(client.proxy_url.is_none());
    }

    #[test]
    fn test_lookup_url_encodes_target() {
        let client = SongLinkClient::with_base_url("http://localhost:8080/links/");
        assert_eq!(
            client.lookup_url("https://open.spotify.com/track/1"),
            "http://localhost:8080/links?url=https%3A%2F%2Fopen.spotify.com%2Ftrack%2F1"
        );
    }

    #[test]
    fn test_optional_parameters() {
        let client = SongLinkClient::from_config(&ResolverConfig {
            base_url: "http://h/links".to_string(),
            user_country: Some("GB".to_string()),
            api_key: Some("k 1".to_string()),
            proxy_url: Some(String::new()),
        })
        .unwrap();

        assert_eq!(client.request_url("x"), "http://h/links?url=x&userCountry=GB&key=k%201");
    }

    #[test]
    fn test_proxy_wraps_whole_lookup() {
        let client = SongLinkClient::from_config(&ResolverConfig {
            base_url: "http://h/links".to_string(),
            proxy_url: Some("https://proxy.test/get".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            client.request_url("a b"),
            "https://proxy.test/get?url=http%3A%2F%2Fh%2Flinks%3Furl%3Da%2520b"
        );
    }

    #[test]
    fn test_logged_url_masks_api_key() {
        let client = SongLinkClient::from_config(&ResolverConfig {
            base_url: "http://h/links".to_string(),
            api_key: Some("s3cret".to_string()),
            proxy_url: Some("https://proxy.test/get".to_string()),
            ..Default::default()
        })
        .unwrap();

        let logged = client.redacted_request_url("x");

        assert!(!logged.contains("s3cret"));
        assert!(logged.contains("key%3DREDACTED"));
        assert!(client.request_url("x").contains("s3cret"));
    }

    #[test]
    fn test_logged_url_without_key_is_request_url() {
        let client = SongLinkClient::with_base_url("http://h/links");
        assert_eq!(client.redacted_request_url("x"), client.request_url("x"));
    }

    #[test]
    fn test_envelope_with_upstream_error() {
        let body = r#"{"contents": "{\"statusCode\":400}", "status": {"http_code": 400}}"#;
        let err = unwrap_envelope(body).unwrap_err();
        assert!(matches!(err, ResolutionError::ServiceError { status: 400, .. }));
    }

    #[test]
    fn test_envelope_without_contents() {
        let err = unwrap_envelope(r#"{"status": {"http_code": 200}}"#).unwrap_err();
        assert!(matches!(err, ResolutionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let (base, request) = serve_once("200 OK", SONG_BAND_RESPONSE.to_string()).await;
        let client = SongLinkClient::with_base_url(format!("{base}/links"));

        let data = client
            .resolve("https://open.spotify.com/track/123")
            .await
            .unwrap();

        assert_eq!(data.title, "Song");
        assert_eq!(data.artist, "Band");
        assert_eq!(data.url_for("spotify"), Some("https://open.spotify.com/x"));

        let request = request.await.unwrap();
        assert!(request.starts_with(
            "GET /links?url=https%3A%2F%2Fopen.spotify.com%2Ftrack%2F123 HTTP/1.1"
        ));
    }

    #[tokio::test]
    async fn test_resolve_through_proxy() {
        let envelope = serde_json::json!({
            "contents": SONG_BAND_RESPONSE,
            "status": {"http_code": 200}
        });
        let (base, request) = serve_once("200 OK", envelope.to_string()).await;
        let client = SongLinkClient::from_config(&ResolverConfig {
            proxy_url: Some(format!("{base}/get")),
            ..Default::default()
        })
        .unwrap();

        let data = client.resolve("https://open.spotify.com/track/123").await.unwrap();

        assert_eq!(data.title, "Song");
        let request = request.await.unwrap();
        assert!(request.starts_with("GET /get?url=https%3A%2F%2Fapi.song.link"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_service_error() {
        let (base, _request) = serve_once(
            "400 Bad Request",
            r#"{"statusCode":400,"code":"could_not_resolve_entity"}"#.to_string(),
        )
        .await;
        let client = SongLinkClient::with_base_url(base);

        let err = client.resolve("https://open.spotify.com/track/0").await.unwrap_err();

        match err {
            ResolutionError::ServiceError { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("could_not_resolve_entity"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_entity_is_no_metadata() {
        let body = r#"{"entityUniqueId": "A", "entitiesByUniqueId": {}, "linksByPlatform": {}}"#;
        let (base, _request) = serve_once("200 OK", body.to_string()).await;
        let client = SongLinkClient::with_base_url(base);

        let err = client.resolve("https://open.spotify.com/track/0").await.unwrap_err();

        assert!(matches!(err, ResolutionError::NoMetadata { .. }));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_malformed_primary_entity_is_no_metadata() {
        let body = r#"{"entityUniqueId": "A", "entitiesByUniqueId": {"A": {"title": 5}}}"#;
        let (base, _request) = serve_once("200 OK", body.to_string()).await;
        let client = SongLinkClient::with_base_url(base);

        let err = client.resolve("https://open.spotify.com/track/0").await.unwrap_err();

        assert_eq!(
            err,
            ResolutionError::NoMetadata {
                entity_id: "A".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_secondary_entity_still_resolves() {
        let body = r#"{
            "entityUniqueId": "A",
            "entitiesByUniqueId": {
                "A": {"title": "Song", "artistName": "Band", "thumbnailUrl": "img.jpg"},
                "B": {"title": "Other", "platforms": null, "thumbnailWidth": "wide"}
            },
            "linksByPlatform": {
                "spotify": {"url": "https://open.spotify.com/x", "nativeAppUriDesktop": 1}
            }
        }"#;
        let (base, _request) = serve_once("200 OK", body.to_string()).await;
        let client = SongLinkClient::with_base_url(base);

        let data = client.resolve("https://open.spotify.com/track/0").await.unwrap();

        assert_eq!(data.title, "Song");
        assert_eq!(data.artist, "Band");
        assert_eq!(data.url_for("spotify"), Some("https://open.spotify.com/x"));
    }

    #[tokio::test]
    async fn test_garbage_body_is_malformed() {
        let (base, _request) = serve_once("200 OK", "<html>oops</html>".to_string()).await;
        let client = SongLinkClient::with_base_url(base);

        let err = client.resolve("https://open.spotify.com/track/0").await.unwrap_err();

        assert!(matches!(err, ResolutionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_failure() {
        let client = SongLinkClient::with_base_url(closed_port_url().await);

        let err = client.resolve("https://open.spotify.com/track/0").await.unwrap_err();

        assert!(matches!(err, ResolutionError::NetworkFailure(_)));
        assert!(err.is_transient());
    }
}
