//! Deezer public API client.
//!
//! Track search needs no API key. Deezer reports some errors with a 200
//! status and an `error` object in the body.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{MusicError, MusicProvider, Track};
use crate::config::MusicConfig;
use crate::metrics::{EXTERNAL_SERVICE_DURATION, EXTERNAL_SERVICE_REQUESTS};

const WIDGET_BASE_URL: &str = "https://widget.deezer.com/widget/dark/track";

/// Deezer API client.
pub struct DeezerClient {
    client: Client,
    base_url: String,
}

impl DeezerClient {
    /// Create a new Deezer client.
    pub fn new(config: &MusicConfig) -> Result<Self, MusicError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn search_inner(&self, query: &str, limit: u32) -> Result<Vec<Track>, MusicError> {
        let url = format!("{}/search", self.base_url);

        debug!("Deezer track search: query='{}', limit={}", query, limit);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MusicError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let search_result: DeezerSearchResponse = response.json().await.map_err(|e| {
            MusicError::ParseError(format!("Failed to parse track search response: {}", e))
        })?;

        if let Some(error) = search_result.error {
            return Err(MusicError::ApiError {
                status: status.as_u16(),
                message: format!("{}: {}", error.kind, error.message),
            });
        }

        let tracks = search_result
            .data
            .into_iter()
            .take(limit as usize)
            .map(Track::from)
            .collect();

        Ok(tracks)
    }
}

#[async_trait]
impl MusicProvider for DeezerClient {
    fn name(&self) -> &'static str {
        "deezer"
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, MusicError> {
        let start = Instant::now();
        let result = self.search_inner(query, limit).await;

        let status = if result.is_ok() { "success" } else { "error" };
        EXTERNAL_SERVICE_REQUESTS
            .with_label_values(&["deezer", "search", status])
            .inc();
        EXTERNAL_SERVICE_DURATION
            .with_label_values(&["deezer", "search"])
            .observe(start.elapsed().as_secs_f64());

        result
    }
}

// ============================================================================
// Deezer API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct DeezerSearchResponse {
    #[serde(default)]
    data: Vec<DeezerTrack>,
    #[serde(default)]
    error: Option<DeezerApiError>,
}

#[derive(Debug, Deserialize)]
struct DeezerApiError {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct DeezerTrack {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    preview: Option<String>,
    #[serde(default)]
    artist: Option<DeezerArtist>,
    #[serde(default)]
    contributors: Vec<DeezerArtist>,
}

#[derive(Debug, Deserialize)]
struct DeezerArtist {
    #[serde(default)]
    name: String,
}

impl From<DeezerTrack> for Track {
    fn from(t: DeezerTrack) -> Self {
        // Search results only carry the main artist; full track objects list contributors.
        let artists = if t.contributors.is_empty() {
            t.artist.map(|a| a.name).unwrap_or_default()
        } else {
            t.contributors
                .into_iter()
                .map(|a| a.name)
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Track {
            id: t.id.to_string(),
            name: t.title,
            artists,
            preview_url: t.preview.filter(|p| !p.is_empty()),
            embed_url: Some(format!("{}/{}", WIDGET_BASE_URL, t.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = MusicConfig {
            base_url: "https://api.deezer.com/".to_string(),
            ..MusicConfig::default()
        };
        let client = DeezerClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.deezer.com");
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "data": [
                {
                    "id": 3135556,
                    "title": "Harder, Better, Faster, Stronger",
                    "preview": "https://cdns-preview-d.dzcdn.net/stream/c-deda7fa9316d9e9e880d2c6207e92260-8.mp3",
                    "artist": {"id": 27, "name": "Daft Punk"},
                    "album": {"id": 302127, "title": "Discovery"}
                },
                {
                    "id": 42,
                    "title": "No Preview",
                    "preview": "",
                    "artist": {"id": 1, "name": "Someone"}
                }
            ],
            "total": 2
        }"#;
        let response: DeezerSearchResponse = serde_json::from_str(json).unwrap();
        let tracks: Vec<Track> = response.data.into_iter().map(Track::from).collect();

        assert_eq!(tracks[0].id, "3135556");
        assert_eq!(tracks[0].name, "Harder, Better, Faster, Stronger");
        assert_eq!(tracks[0].artists, "Daft Punk");
        assert!(tracks[0].preview_url.is_some());
        assert_eq!(
            tracks[0].embed_url.as_deref(),
            Some("https://widget.deezer.com/widget/dark/track/3135556")
        );
        assert!(tracks[1].preview_url.is_none());
    }

    #[test]
    fn test_contributors_joined() {
        let json = r#"{
            "id": 7,
            "title": "Collab",
            "artist": {"name": "Main"},
            "contributors": [{"name": "Main"}, {"name": "Guest"}]
        }"#;
        let track: DeezerTrack = serde_json::from_str(json).unwrap();
        assert_eq!(Track::from(track).artists, "Main, Guest");
    }

    #[test]
    fn test_parse_error_body() {
        let json = r#"{"error": {"type": "Exception", "message": "Quota limit exceeded", "code": 4}}"#;
        let response: DeezerSearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.data.is_empty());
        let error = response.error.unwrap();
        assert_eq!(error.kind, "Exception");
        assert_eq!(error.message, "Quota limit exceeded");
    }
}
