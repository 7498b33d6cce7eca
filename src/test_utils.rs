//! Test utilities and fixtures for smartlink tests.
//!
//! This module provides common test helpers, mock factories, and a
//! one-shot HTTP responder to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use smartlink::test_utils::{temp_store, mock_form};
//!
//! #[test]
//! fn test_something() {
//!     let (store, _dir) = temp_store();
//!     let link = store.create(mock_form()).unwrap();
//!     // ... test logic
//! }
//! ```

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::model::{PlatformLink, SmartlinkFormData};
use crate::store::{SmartlinkStore, SqliteRepository};

/// A resolution response for "Song" by "Band" with a Spotify link.
pub const SONG_BAND_RESPONSE: &str = r#"{
    "entityUniqueId": "A",
    "userCountry": "US",
    "pageUrl": "https://song.link/s/1",
    "entitiesByUniqueId": {
        "A": {
            "id": "1",
            "type": "song",
            "title": "Song",
            "artistName": "Band",
            "thumbnailUrl": "img.jpg",
            "apiProvider": "spotify",
            "platforms": ["spotify"]
        }
    },
    "linksByPlatform": {
        "spotify": {
            "url": "https://open.spotify.com/x",
            "entityUniqueId": "A"
        }
    }
}"#;

/// Creates a SQLite-backed store in a temporary directory.
///
/// Keep the TempDir alive for the duration of your test; the database is
/// deleted when it goes out of scope.
pub fn temp_store() -> (SmartlinkStore<SqliteRepository>, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let store = SmartlinkStore::open(&dir.path().join("test.db"))
        .expect("Failed to open test store");
    (store, dir)
}

/// Creates a form with sensible defaults and one Spotify link.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let custom = SmartlinkFormData {
///     title: "Custom Title".to_string(),
///     ..mock_form()
/// };
/// ```
pub fn mock_form() -> SmartlinkFormData {
    SmartlinkFormData {
        title: "Test Song".to_string(),
        artist: "Test Artist".to_string(),
        description: "Out now".to_string(),
        release_date: "2024-05-01".to_string(),
        cover_image: "https://img.test/cover.jpg".to_string(),
        platforms: vec![PlatformLink {
            id: "spotify".to_string(),
            name: "Spotify".to_string(),
            url: "https://open.spotify.com/track/1".to_string(),
            icon: "spotify".to_string(),
            color: "#1DB954".to_string(),
        }],
        ..Default::default()
    }
}

/// Serves exactly one HTTP response on a local port.
///
/// Returns the base URL (`http://127.0.0.1:<port>`) and a handle that
/// yields the raw request head once the response has been written.
pub async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Failed to accept");

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("Failed to read request");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("Failed to write response");
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{addr}"), handle)
}

/// A URL on a local port nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{addr}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_store_creates_working_database() {
        let (store, dir) = temp_store();

        assert!(store.list().unwrap().is_empty());
        assert!(dir.path().join("test.db").exists());
    }

    #[test]
    fn test_mock_form_defaults() {
        let form = mock_form();
        assert_eq!(form.title, "Test Song");
        assert_eq!(form.platforms.len(), 1);
        assert_eq!(form.platforms[0].id, "spotify");
    }

    #[test]
    fn test_song_band_response_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(SONG_BAND_RESPONSE).unwrap();
        assert_eq!(value["entityUniqueId"], "A");
    }

    #[tokio::test]
    async fn test_serve_once_answers_and_captures_request() {
        let (base, request) = serve_once("201 Created", "{}".to_string()).await;

        let response = reqwest::get(format!("{base}/ping?x=1")).await.unwrap();
        assert_eq!(response.status().as_u16(), 201);
        assert_eq!(response.text().await.unwrap(), "{}");

        assert!(request.await.unwrap().starts_with("GET /ping?x=1 HTTP/1.1"));
    }
}
