//! Platform catalog - the single source of truth for canonical platform keys.
//!
//! Every streaming platform the resolver understands has one
//! [`PlatformDescriptor`] here. The normalizer uses it to translate the
//! resolution service's provider keys (e.g. `itunes`) into our canonical
//! keys (e.g. `appleMusic`), and the merge logic uses it for display name,
//! icon and brand color.
//!
//! Ids that are not in the catalog belong to user-defined custom platforms.

use crate::ids;

/// A statically known streaming platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformDescriptor {
    /// Canonical key stored in [`crate::model::PlatformLink::id`]
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Key used by the resolution service in `linksByPlatform`
    pub provider_key: &'static str,
    /// Icon reference
    pub icon: &'static str,
    /// Brand color
    pub color: &'static str,
}

/// Icon for canonical keys the catalog does not know about.
pub const FALLBACK_ICON: &str = "music-note";

/// Icon for user-defined custom platforms.
pub const CUSTOM_ICON: &str = "link";

/// Color for anything without a brand color.
pub const NEUTRAL_COLOR: &str = "#6b7280";

/// Prefix marking user-defined platform ids.
pub const CUSTOM_PREFIX: &str = "custom-";

const fn platform(
    id: &'static str,
    name: &'static str,
    provider_key: &'static str,
    color: &'static str,
) -> PlatformDescriptor {
    PlatformDescriptor {
        id,
        name,
        provider_key,
        icon: id,
        color,
    }
}

/// Catalog entries in presentation order.
static PLATFORMS: [PlatformDescriptor; 13] = [
    platform("spotify", "Spotify", "spotify", "#1DB954"),
    platform("appleMusic", "Apple Music", "itunes", "#FA243C"),
    platform("youtube", "YouTube", "youtube", "#FF0000"),
    platform("youtubeMusic", "YouTube Music", "youtubeMusic", "#FF0033"),
    platform("deezer", "Deezer", "deezer", "#A238FF"),
    platform("amazonMusic", "Amazon Music", "amazon", "#00A8E1"),
    platform("tidal", "Tidal", "tidal", "#000000"),
    platform("soundcloud", "SoundCloud", "soundcloud", "#FF5500"),
    platform("pandora", "Pandora", "pandora", "#3668FF"),
    platform("napster", "Napster", "napster", "#2259FF"),
    platform("audiomack", "Audiomack", "audiomack", "#FFA200"),
    platform("anghami", "Anghami", "anghami", "#A900FF"),
    platform("boomplay", "Boomplay", "boomplay", "#0A8FF4"),
];

/// All known platforms, in presentation order.
pub fn list_platforms() -> &'static [PlatformDescriptor] {
    &PLATFORMS
}

/// Find a platform by canonical key.
pub fn lookup(id: &str) -> Option<&'static PlatformDescriptor> {
    PLATFORMS.iter().find(|p| p.id == id)
}

/// Find a platform by the resolution service's provider key.
pub fn lookup_by_provider(provider_key: &str) -> Option<&'static PlatformDescriptor> {
    PLATFORMS.iter().find(|p| p.provider_key == provider_key)
}

/// Display name for a platform id, falling back to the id itself.
pub fn display_name(id: &str) -> &str {
    lookup(id).map(|p| p.name).unwrap_or(id)
}

/// Whether `id` was generated for a user-defined platform.
pub fn is_custom_platform(id: &str) -> bool {
    id.starts_with(CUSTOM_PREFIX)
}

/// Generate a fresh id for a user-defined platform.
pub fn new_custom_platform_id() -> String {
    format!("{}{}", CUSTOM_PREFIX, ids::timestamped_suffix(6))
}
