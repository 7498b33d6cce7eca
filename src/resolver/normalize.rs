//! Adapter layer: Convert song.link DTOs to [`SmartlinkData`]
//!
//! This is the ONLY place where resolution DTOs become domain types.
//! Pure and deterministic, so it is tested without any network access.

use serde::Deserialize;

use super::domain::{ResolutionError, ResolvedLink, SmartlinkData, UNKNOWN_ARTIST, UNKNOWN_TITLE};
use super::dto;
use crate::catalog;

/// Convert a links response into canonical smartlink data.
///
/// Metadata comes only from the primary entity (the one named by
/// `entityUniqueId`). Platforms are read through the catalog's provider
/// keys and kept only when the service supplied a non-empty URL. A missing
/// or malformed primary entity is [`ResolutionError::NoMetadata`]; other
/// entities are never decoded.
pub fn normalize(response: &dto::LinksResponse) -> Result<SmartlinkData, ResolutionError> {
    let no_metadata = || ResolutionError::NoMetadata {
        entity_id: response.entity_unique_id.clone(),
    };

    let raw = response
        .entities_by_unique_id
        .get(&response.entity_unique_id)
        .ok_or_else(no_metadata)?;
    let entity = dto::Entity::deserialize(raw).map_err(|e| {
        tracing::debug!(
            target: "smartlink::resolver",
            entity = %response.entity_unique_id,
            error = %e,
            "Malformed primary entity"
        );
        no_metadata()
    })?;

    let platforms = catalog::list_platforms()
        .iter()
        .filter_map(|platform| {
            let url = response
                .links_by_platform
                .get(platform.provider_key)?
                .url
                .as_deref()
                .filter(|url| !url.is_empty())?;
            Some(ResolvedLink {
                platform: platform.id.to_string(),
                url: url.to_string(),
            })
        })
        .collect();

    Ok(SmartlinkData {
        title: non_empty_or(entity.title.as_deref(), UNKNOWN_TITLE),
        artist: non_empty_or(entity.artist_name.as_deref(), UNKNOWN_ARTIST),
        image_url: entity.thumbnail_url.clone().unwrap_or_default(),
        platforms,
    })
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
