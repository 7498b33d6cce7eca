//! Merging resolved links into a user's platform list.
//!
//! Strictly additive: existing entries are never overwritten, reordered or
//! removed, so a URL the user typed by hand survives any number of
//! re-resolutions.

use crate::catalog::{self, FALLBACK_ICON, NEUTRAL_COLOR};
use crate::model::PlatformLink;
use crate::resolver::{ResolvedLink, SmartlinkData};

/// Append every resolved platform whose id is not already present.
pub fn merge_resolved(existing: &[PlatformLink], resolved: &SmartlinkData) -> Vec<PlatformLink> {
    let mut merged = existing.to_vec();
    for link in &resolved.platforms {
        if !merged.iter().any(|p| p.id == link.platform) {
            merged.push(to_platform_link(link));
        }
    }
    merged
}

/// Build a display-ready link from the catalog entry for its key.
pub fn to_platform_link(link: &ResolvedLink) -> PlatformLink {
    match catalog::lookup(&link.platform) {
        Some(descriptor) => PlatformLink {
            id: link.platform.clone(),
            name: descriptor.name.to_string(),
            url: link.url.clone(),
            icon: descriptor.icon.to_string(),
            color: descriptor.color.to_string(),
        },
        None => PlatformLink {
            id: link.platform.clone(),
            name: link.platform.clone(),
            url: link.url.clone(),
            icon: FALLBACK_ICON.to_string(),
            color: NEUTRAL_COLOR.to_string(),
        },
    }
}
