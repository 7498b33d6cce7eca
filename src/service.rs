//! Smartlink service - the "magic link" flow
//!
//! Turns one pasted music URL into a filled-in form:
//! 1. Check the URL is from a supported streaming service
//! 2. Resolve it into canonical metadata and platform links
//! 3. Apply the result to the form (metadata overwritten, platforms merged)
//!
//! Persisting the form is left to the caller.

use crate::error::Result;
use crate::model::{Customization, SmartlinkFormData};
use crate::resolver::{LinkResolver, SongLinkClient, validate_music_url};

/// Service that fills smartlink forms from music URLs
pub struct SmartlinkService<R: LinkResolver = SongLinkClient> {
    resolver: R,
}

impl<R: LinkResolver> SmartlinkService<R> {
    /// Create a service around the given resolver
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// The underlying resolver
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolve `url` into `form`.
    ///
    /// Returns the number of platforms added. On any error the form is left
    /// untouched, and an unsupported URL never reaches the resolver.
    pub async fn generate(&self, form: &mut SmartlinkFormData, url: &str) -> Result<usize> {
        let url = url.trim();
        validate_music_url(url)?;

        tracing::debug!(target: "smartlink::service", url, "Resolving music link");
        let resolved = self.resolver.resolve(url).await?;

        let added = form.apply_resolved(&resolved);
        tracing::info!(
            target: "smartlink::service",
            title = %form.title,
            artist = %form.artist,
            added,
            total = form.platforms.len(),
            "Applied resolved link"
        );
        Ok(added)
    }

    /// Resolve `url` into a fresh form with the given page colors.
    pub async fn resolve_into_new(
        &self,
        url: &str,
        customization: Customization,
    ) -> Result<SmartlinkFormData> {
        let mut form = SmartlinkFormData::with_customization(customization);
        self.generate(&mut form, url).await?;
        Ok(form)
    }
}
