//! Music link validation.
//!
//! A link is supported when it parses as a URL and its host contains one of
//! the known streaming domains as a substring, so regional and mobile hosts
//! like `open.spotify.com` or `music.amazon.de` pass.

use url::Url;

use super::domain::InvalidUrlError;

/// Host fragments of streaming services the resolver can handle.
const MUSIC_DOMAINS: &[&str] = &[
    "spotify.com",
    "music.apple.com",
    "youtube.com",
    "youtu.be",
    "music.youtube.com",
    "deezer.com",
    "music.amazon.",
    "tidal.com",
    "soundcloud.com",
    "pandora.com",
    "napster.com",
    "audiomack.com",
    "anghami.com",
    "boomplay.com",
];

/// Whether `url` points at a known music-streaming domain.
pub fn is_supported_music_url(url: &str) -> bool {
    validate_music_url(url).is_ok()
}

/// Parse `url` and check it against the streaming allow-list.
pub fn validate_music_url(url: &str) -> Result<Url, InvalidUrlError> {
    let parsed = Url::parse(url.trim()).map_err(|e| InvalidUrlError {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let host = parsed.host_str().unwrap_or_default().to_ascii_lowercase();
    if MUSIC_DOMAINS.iter().any(|domain| host.contains(domain)) {
        Ok(parsed)
    } else {
        Err(InvalidUrlError {
            url: url.to_string(),
            reason: format!("unsupported host {:?}", host),
        })
    }
}
