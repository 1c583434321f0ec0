//! Mock music provider for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::music::{MusicError, MusicProvider, Track};

/// Mock implementation of the MusicProvider trait.
///
/// Matches tracks whose name or artists contain the query, records queries
/// and can fail the next search.
#[derive(Debug, Default)]
pub struct MockMusicProvider {
    tracks: Arc<RwLock<Vec<Track>>>,
    queries: Arc<RwLock<Vec<String>>>,
    next_error: Arc<RwLock<Option<MusicError>>>,
}

impl MockMusicProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_tracks(&self, tracks: Vec<Track>) {
        *self.tracks.write().await = tracks;
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: MusicError) {
        *self.next_error.write().await = Some(error);
    }

    /// Queries received so far, in order.
    pub async fn recorded_queries(&self) -> Vec<String> {
        self.queries.read().await.clone()
    }
}

#[async_trait]
impl MusicProvider for MockMusicProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, MusicError> {
        self.queries.write().await.push(query.to_string());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let query_lower = query.to_lowercase();
        let results = self
            .tracks
            .read()
            .await
            .iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&query_lower)
                    || t.artists.to_lowercase().contains(&query_lower)
            })
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(results)
    }
}
