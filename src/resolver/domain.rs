//! Internal domain models for link resolution.
//!
//! These types are OUR types - they don't change when the resolution
//! service changes its response shape. Responses get converted into these
//! types by the normalizer.

/// Title used when the primary entity has none.
pub const UNKNOWN_TITLE: &str = "Unknown title";

/// Artist used when the primary entity has none.
pub const UNKNOWN_ARTIST: &str = "Unknown artist";

/// One resolved destination, keyed by canonical platform key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Canonical catalog key
    pub platform: String,
    /// Non-empty URL supplied by the service
    pub url: String,
}

/// Canonical result of resolving a single music URL.
///
/// Produced per resolution call and consumed straight away by the merge
/// logic; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartlinkData {
    pub title: String,
    pub artist: String,
    /// Empty when the service had no thumbnail
    pub image_url: String,
    /// Catalog order, one entry per platform with a URL
    pub platforms: Vec<ResolvedLink>,
}

impl SmartlinkData {
    /// URL resolved for a canonical platform key.
    pub fn url_for(&self, platform: &str) -> Option<&str> {
        self.platforms
            .iter()
            .find(|link| link.platform == platform)
            .map(|link| link.url.as_str())
    }
}

/// Errors raised while resolving a URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("Network error: {0}")]
    NetworkFailure(String),

    #[error("Resolution service returned HTTP {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("No metadata found for entity {entity_id:?}")]
    NoMetadata { entity_id: String },

    #[error("Failed to decode resolution response: {0}")]
    MalformedResponse(String),
}

impl ResolutionError {
    /// Whether retrying the same URL may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkFailure(_) | Self::ServiceError { .. })
    }
}

/// Raised by [`super::validate_music_url`] for links we can't resolve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Not a supported music link: {url:?} ({reason})")]
pub struct InvalidUrlError {
    pub url: String,
    pub reason: String,
}
