//! Music track search.
//!
//! Tracks come from a [`MusicProvider`]; [`MusicCatalog`] wraps one and turns
//! provider failures into empty result lists.

mod deezer;

pub use deezer::DeezerClient;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::metrics::MUSIC_SEARCHES;

/// Default number of tracks returned by a search.
pub const DEFAULT_TRACK_LIMIT: u32 = 12;

/// Errors that can occur when talking to a music provider.
#[derive(Debug, Error)]
pub enum MusicError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Provider returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// A playable track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// Provider track id.
    pub id: String,
    /// Track title.
    pub name: String,
    /// Comma separated artist names.
    pub artists: String,
    /// Short audio preview, when the provider has one.
    #[serde(default)]
    pub preview_url: Option<String>,
    /// Player widget URL usable in an iframe.
    #[serde(default)]
    pub embed_url: Option<String>,
}

/// Backend able to search tracks.
#[async_trait]
pub trait MusicProvider: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &'static str;

    /// Search tracks by free text.
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, MusicError>;
}

/// Track search that never fails.
pub struct MusicCatalog {
    provider: Arc<dyn MusicProvider>,
}

impl MusicCatalog {
    pub fn new(provider: Arc<dyn MusicProvider>) -> Self {
        Self { provider }
    }

    /// Search tracks. Blank queries and provider errors give an empty list.
    pub async fn search(&self, query: &str, limit: u32) -> Vec<Track> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        match self.provider.search_tracks(query, limit).await {
            Ok(tracks) => {
                debug!(
                    "{} search '{}' returned {} tracks",
                    self.provider.name(),
                    query,
                    tracks.len()
                );
                MUSIC_SEARCHES.with_label_values(&["success"]).inc();
                tracks
            }
            Err(e) => {
                warn!("{} search '{}' failed: {}", self.provider.name(), query, e);
                MUSIC_SEARCHES.with_label_values(&["failed"]).inc();
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockMusicProvider};

    fn catalog_with(provider: &Arc<MockMusicProvider>) -> MusicCatalog {
        MusicCatalog::new(Arc::clone(provider) as Arc<dyn MusicProvider>)
    }

    #[tokio::test]
    async fn test_search_returns_provider_tracks() {
        let provider = Arc::new(MockMusicProvider::new());
        provider
            .set_tracks(vec![
                fixtures::track("1", "Harder, Better, Faster, Stronger", "Daft Punk"),
                fixtures::track("2", "One More Time", "Daft Punk"),
            ])
            .await;
        let catalog = catalog_with(&provider);

        let tracks = catalog.search("daft punk", 10).await;
        assert_eq!(tracks.len(), 2);
        assert_eq!(provider.recorded_queries().await, vec!["daft punk".to_string()]);
    }

    #[tokio::test]
    async fn test_blank_query_skips_provider() {
        let provider = Arc::new(MockMusicProvider::new());
        let catalog = catalog_with(&provider);

        assert!(catalog.search("   ", 10).await.is_empty());
        assert!(catalog.search("daft punk", 0).await.is_empty());
        assert!(provider.recorded_queries().await.is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_degrades_to_empty() {
        let provider = Arc::new(MockMusicProvider::new());
        provider
            .set_tracks(vec![fixtures::track("1", "Song", "Artist")])
            .await;
        provider
            .set_next_error(MusicError::ApiError {
                status: 500,
                message: "boom".to_string(),
            })
            .await;
        let catalog = catalog_with(&provider);

        assert!(catalog.search("song", 5).await.is_empty());
        assert_eq!(catalog.search("song", 5).await.len(), 1);
    }
}
