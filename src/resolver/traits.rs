//! Trait definition for the link resolution seam.
//!
//! Production code uses [`SongLinkClient`](super::SongLinkClient); tests and
//! collaborators can substitute their own implementation.

use async_trait::async_trait;

use super::domain::{ResolutionError, SmartlinkData};

/// Anything that turns a music URL into canonical smartlink data.
#[async_trait]
pub trait LinkResolver: Send + Sync {
    /// Resolve `url`. A second call for the same URL re-executes fully.
    async fn resolve(&self, url: &str) -> Result<SmartlinkData, ResolutionError>;
}

#[async_trait]
impl LinkResolver for super::client::SongLinkClient {
    async fn resolve(&self, url: &str) -> Result<SmartlinkData, ResolutionError> {
        self.resolve(url).await
    }
}
