//! song.link (Odesli) API Data Transfer Objects
//!
//! These types match what the `/v1-alpha.1/links` endpoint returns.
//! DO NOT use these types outside the resolver module - normalize them first.
//!
//! API Reference: https://linktr.ee/odesli (public API docs)
//!
//! Most fields are optional or defaulted: the service omits keys freely
//! depending on which providers know the song. Entities stay raw JSON until
//! the normalizer picks the primary one, so a quirky secondary entity can't
//! fail the whole lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Response of a links lookup
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinksResponse {
    /// Id of the primary entity in `entities_by_unique_id`
    pub entity_unique_id: String,
    /// Country the lookup was performed for
    pub user_country: Option<String>,
    /// song.link landing page
    pub page_url: Option<String>,
    /// Provider key (e.g. "itunes") -> link
    #[serde(default)]
    pub links_by_platform: HashMap<String, PlatformLinkDto>,
    /// Entity id -> raw entity metadata (decode with [`Entity`])
    #[serde(default)]
    pub entities_by_unique_id: HashMap<String, serde_json::Value>,
}

/// A link for one provider
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformLinkDto {
    /// Web URL (may be missing or empty)
    #[serde(default)]
    pub url: Option<String>,
}

/// Song or album metadata as reported by one provider
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// "song" or "album"
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Envelope returned by AllOrigins-style wrapping proxies.
///
/// The upstream body arrives as a JSON *string* in `contents`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyEnvelope {
    pub contents: Option<String>,
    pub status: Option<ProxyStatus>,
}

/// Upstream status as seen by the proxy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyStatus {
    pub url: Option<String>,
    pub http_code: Option<u16>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// ============================================================================
