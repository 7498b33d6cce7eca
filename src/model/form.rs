//! Editing operations on [`SmartlinkFormData`].
//!
//! These keep the platform list free of duplicate ids; the store itself
//! does not check.

use super::{Customization, PlatformLink, SmartlinkFormData};
use crate::catalog::{self, CUSTOM_ICON, NEUTRAL_COLOR};
use crate::merge::merge_resolved;
use crate::resolver::SmartlinkData;

impl SmartlinkFormData {
    /// Empty form using the given page colors.
    pub fn with_customization(customization: Customization) -> Self {
        Self {
            customization,
            ..Default::default()
        }
    }

    /// Apply a resolution result.
    ///
    /// Title, artist and cover always take the resolved values; platforms
    /// are merged without touching existing entries. Returns the number of
    /// platforms added.
    pub fn apply_resolved(&mut self, resolved: &SmartlinkData) -> usize {
        self.title = resolved.title.clone();
        self.artist = resolved.artist.clone();
        self.cover_image = resolved.image_url.clone();

        let before = self.platforms.len();
        self.platforms = merge_resolved(&self.platforms, resolved);
        self.platforms.len() - before
    }

    /// Whether a platform with this id is already listed.
    pub fn has_platform(&self, id: &str) -> bool {
        self.platforms.iter().any(|p| p.id == id)
    }

    /// Add a catalog platform with an empty URL for the user to fill in.
    ///
    /// Returns false if the id is unknown or already present.
    pub fn add_catalog_platform(&mut self, id: &str) -> bool {
        let Some(descriptor) = catalog::lookup(id) else {
            return false;
        };
        if self.has_platform(id) {
            return false;
        }
        self.platforms.push(PlatformLink {
            id: descriptor.id.to_string(),
            name: descriptor.name.to_string(),
            url: String::new(),
            icon: descriptor.icon.to_string(),
            color: descriptor.color.to_string(),
        });
        true
    }

    /// Add a user-defined platform. Both name and URL are required.
    pub fn add_custom_platform(&mut self, name: &str, url: &str) -> Option<&PlatformLink> {
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url.is_empty() {
            return None;
        }

        let mut id = catalog::new_custom_platform_id();
        while self.has_platform(&id) {
            id = catalog::new_custom_platform_id();
        }

        self.platforms.push(PlatformLink {
            id,
            name: name.to_string(),
            url: url.to_string(),
            icon: CUSTOM_ICON.to_string(),
            color: NEUTRAL_COLOR.to_string(),
        });
        self.platforms.last()
    }

    /// Remove a platform. Returns true if one was removed.
    pub fn remove_platform(&mut self, id: &str) -> bool {
        let before = self.platforms.len();
        self.platforms.retain(|p| p.id != id);
        self.platforms.len() != before
    }

    /// Change the URL of a listed platform. Returns false if it isn't listed.
    pub fn set_platform_url(&mut self, id: &str, url: &str) -> bool {
        match self.platforms.iter_mut().find(|p| p.id == id) {
            Some(platform) => {
                platform.url = url.to_string();
                true
            }
            None => false,
        }
    }
}
