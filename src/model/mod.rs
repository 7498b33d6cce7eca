//! Core data models for smartlinks.
//!
//! Defines the persisted aggregate [`Smartlink`], its editable subset
//! [`SmartlinkFormData`], and the per-platform entry [`PlatformLink`].
//!
//! # Serialized Shape
//!
//! Records are stored as camelCase JSON documents keyed by [`Smartlink::id`]:
//! - `coverImage`, `releaseDate`, `createdAt`, `updatedAt`
//! - `analytics.gtmId`, `analytics.ga4Id`
//! - `customization.backgroundColor`, `textColor`, `buttonColor`, `buttonTextColor`

mod form;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One streaming destination on a smartlink page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformLink {
    /// Canonical catalog key (e.g. `spotify`) or a `custom-...` id
    pub id: String,
    /// Display name
    pub name: String,
    /// Destination URL (may be empty while the user is still editing)
    pub url: String,
    /// Icon reference
    pub icon: String,
    /// Brand color as a CSS hex string
    pub color: String,
}

/// Optional tracking-tag identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    /// Google Tag Manager container id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtm_id: Option<String>,
    /// Google Analytics 4 measurement id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ga4_id: Option<String>,
}

/// Page colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customization {
    pub background_color: String,
    pub text_color: String,
    pub button_color: String,
    pub button_text_color: String,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            text_color: "#000000".to_string(),
            button_color: "#3b82f6".to_string(),
            button_text_color: "#ffffff".to_string(),
        }
    }
}

/// The editable part of a smartlink.
///
/// Identical to [`Smartlink`] minus id, timestamps and counters. Editing
/// helpers live in the `form` submodule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmartlinkFormData {
    pub title: String,
    pub artist: String,
    pub description: String,
    pub release_date: String,
    pub cover_image: String,
    pub platforms: Vec<PlatformLink>,
    pub analytics: Analytics,
    pub customization: Customization,
}

/// A persisted smartlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Smartlink {
    /// Opaque unique id, never reused
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub release_date: String,
    /// Presentation order
    #[serde(default)]
    pub platforms: Vec<PlatformLink>,
    #[serde(default)]
    pub analytics: Analytics,
    #[serde(default)]
    pub customization: Customization,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Recorded page views
    #[serde(default)]
    pub views: u64,
    /// Recorded clicks per platform id
    #[serde(default)]
    pub clicks: BTreeMap<String, u64>,
}

impl Smartlink {
    /// Build a fresh record from form data with zeroed counters.
    pub fn from_form(id: String, form: SmartlinkFormData, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: form.title,
            artist: form.artist,
            description: form.description,
            cover_image: form.cover_image,
            release_date: form.release_date,
            platforms: form.platforms,
            analytics: form.analytics,
            customization: form.customization,
            created_at: now,
            updated_at: now,
            views: 0,
            clicks: BTreeMap::new(),
        }
    }

    /// Replace every editable field, leaving id, `created_at` and counters alone.
    pub fn apply_form(&mut self, form: SmartlinkFormData, now: DateTime<Utc>) {
        self.title = form.title;
        self.artist = form.artist;
        self.description = form.description;
        self.cover_image = form.cover_image;
        self.release_date = form.release_date;
        self.platforms = form.platforms;
        self.analytics = form.analytics;
        self.customization = form.customization;
        self.updated_at = now;
    }

    /// Copy the editable fields out for an edit session.
    pub fn to_form(&self) -> SmartlinkFormData {
        SmartlinkFormData {
            title: self.title.clone(),
            artist: self.artist.clone(),
            description: self.description.clone(),
            release_date: self.release_date.clone(),
            cover_image: self.cover_image.clone(),
            platforms: self.platforms.clone(),
            analytics: self.analytics.clone(),
            customization: self.customization.clone(),
        }
    }

    /// Clicks recorded for one platform (0 when never clicked).
    pub fn clicks_for(&self, platform_id: &str) -> u64 {
        self.clicks.get(platform_id).copied().unwrap_or(0)
    }

    /// Clicks across all platforms.
    pub fn total_clicks(&self) -> u64 {
        self.clicks.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_customization_colors() {
        let c = Customization::default();
        assert_eq!(c.background_color, "#ffffff");
        assert_eq!(c.text_color, "#000000");
        assert_eq!(c.button_color, "#3b82f6");
        assert_eq!(c.button_text_color, "#ffffff");
    }

    #[test]
    fn test_serializes_camel_case() {
        let link = Smartlink::from_form(
            "smartlink-1-abc".to_string(),
            SmartlinkFormData {
                title: "T".to_string(),
                cover_image: "cover.jpg".to_string(),
                ..Default::default()
            },
            Utc::now(),
        );

        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["coverImage"], "cover.jpg");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["customization"]["buttonTextColor"], "#ffffff");
        assert_eq!(json["views"], 0);
    }

    #[test]
    fn test_form_with_missing_sections_uses_defaults() {
        let form: SmartlinkFormData =
            serde_json::from_str(r#"{"title": "Song", "artist": "Band"}"#).unwrap();
        assert_eq!(form.title, "Song");
        assert!(form.platforms.is_empty());
        assert_eq!(form.customization, Customization::default());
        assert_eq!(form.analytics.gtm_id, None);
    }

    #[test]
    fn test_stored_document_without_title_or_artist() {
        let link: Smartlink = serde_json::from_str(
            r#"{
                "id": "smartlink-1-abc",
                "createdAt": "2024-05-01T10:00:00Z",
                "updatedAt": "2024-05-01T10:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(link.title, "");
        assert_eq!(link.artist, "");
        assert_eq!(link.views, 0);
        assert_eq!(link.customization, Customization::default());
    }

    #[test]
    fn test_apply_form_keeps_identity_and_counters() {
        let created = Utc::now();
        let mut link = Smartlink::from_form("id-1".to_string(), SmartlinkFormData::default(), created);
        link.views = 7;
        link.clicks.insert("spotify".to_string(), 3);

        let later = created + chrono::Duration::seconds(5);
        link.apply_form(
            SmartlinkFormData {
                title: "New".to_string(),
                ..Default::default()
            },
            later,
        );

        assert_eq!(link.id, "id-1");
        assert_eq!(link.title, "New");
        assert_eq!(link.created_at, created);
        assert_eq!(link.updated_at, later);
        assert_eq!(link.views, 7);
        assert_eq!(link.clicks_for("spotify"), 3);
    }

    #[test]
    fn test_click_accessors() {
        let mut link = Smartlink::from_form("id".to_string(), SmartlinkFormData::default(), Utc::now());
        link.clicks.insert("spotify".to_string(), 2);
        link.clicks.insert("deezer".to_string(), 5);

        assert_eq!(link.clicks_for("spotify"), 2);
        assert_eq!(link.clicks_for("tidal"), 0);
        assert_eq!(link.total_clicks(), 7);
    }

    #[test]
    fn test_to_form_roundtrips_editable_fields() {
        let form = SmartlinkFormData {
            title: "Song".to_string(),
            artist: "Band".to_string(),
            description: "desc".to_string(),
            release_date: "2024-05-01".to_string(),
            analytics: Analytics {
                gtm_id: Some("GTM-1".to_string()),
                ga4_id: None,
            },
            ..Default::default()
        };
        let link = Smartlink::from_form("id".to_string(), form.clone(), Utc::now());
        assert_eq!(link.to_form(), form);
    }
}
