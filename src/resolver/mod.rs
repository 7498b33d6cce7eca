//! Link resolution - turns one music URL into a canonical platform link set.
//!
//! # Architecture
//!
//! Same separation as any external API integration:
//! - **Domain models** (`domain.rs`) - [`SmartlinkData`] and the error types
//! - **API DTOs** (`dto.rs`) - exact song.link response shapes
//! - **Normalizer** (`normalize.rs`) - pure DTO -> domain conversion
//! - **Client** (`client.rs`) - HTTP client for the song.link API
//! - **Validation** (`music_url.rs`) - which links are worth resolving
//! - **Traits** (`traits.rs`) - the [`LinkResolver`] seam for injection
//!
//! # Usage
//!
//! ```ignore
//! use smartlink::resolver::{SongLinkClient, is_supported_music_url};
//!
//! let url = "https://open.spotify.com/track/0sNOF9WDwhWunNAHPD3Baj";
//! if is_supported_music_url(url) {
//!     let client = SongLinkClient::new()?;
//!     let data = client.resolve(url).await?;
//!     println!("{} - {} ({} platforms)", data.artist, data.title, data.platforms.len());
//! }
//! ```

mod client;
pub mod domain;
pub mod dto;
mod music_url;
mod normalize;
pub mod traits;

pub use client::{DEFAULT_BASE_URL, SongLinkClient};
pub use domain::{
    InvalidUrlError, ResolutionError, ResolvedLink, SmartlinkData, UNKNOWN_ARTIST, UNKNOWN_TITLE,
};
pub use music_url::{is_supported_music_url, validate_music_url};
pub use normalize::normalize;
pub use traits::LinkResolver;
