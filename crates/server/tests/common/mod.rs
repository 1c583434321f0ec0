//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock data sources injected, so the API can be exercised without
//! reaching iptv-org or Deezer.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use mediahub_core::{
    testing::{MockDatasetSource, MockMusicProvider},
    Config, DatasetCache, DatasetSource, GamesConfig, GamesLibrary, IptvCatalog, MusicCatalog,
    MusicProvider,
};
use mediahub_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use mediahub_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server with fully controllable mocks for:
/// - IPTV datasets (MockDatasetSource)
/// - Music search (MockMusicProvider)
/// - Games (a temporary games directory)
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock IPTV dataset source
    pub datasets: Arc<MockDatasetSource>,
    /// Mock music provider
    pub music: Arc<MockMusicProvider>,
    /// Temporary games directory
    pub games_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let games_dir = TempDir::new().expect("Failed to create temp dir");
        for slug in &test_config.games {
            let game_dir = games_dir.path().join(slug);
            std::fs::create_dir_all(&game_dir).expect("Failed to create game dir");
            std::fs::write(game_dir.join("index.html"), "<html></html>")
                .expect("Failed to write game entry point");
        }

        let datasets = Arc::new(MockDatasetSource::new());
        let music = Arc::new(MockMusicProvider::new());

        let mut config = Config {
            games: GamesConfig {
                dir: games_dir.path().to_path_buf(),
                ..GamesConfig::default()
            },
            ..Config::default()
        };
        config.server.port = 0; // Not used for in-process testing
        config.music.enabled = !test_config.disable_music;

        let cache = Arc::new(DatasetCache::new(
            Arc::clone(&datasets) as Arc<dyn DatasetSource>
        ));
        let iptv = IptvCatalog::new(cache).with_country_match(config.iptv.country_match);
        let music_catalog = config
            .music
            .enabled
            .then(|| MusicCatalog::new(Arc::clone(&music) as Arc<dyn MusicProvider>));
        let games = GamesLibrary::new(&config.games);

        let state = Arc::new(AppState::new(config, iptv, music_catalog, games));
        let router = create_router(state);

        Self {
            router,
            datasets,
            music,
            games_dir,
        }
    }

    /// Load a small catalog of channels, streams and countries.
    pub async fn seed_channels(&self) {
        self.datasets
            .set_channels(vec![
                fixtures::channel("CNN.us", "CNN", "US", &["news"]),
                fixtures::channel("BBCNews.uk", "BBC News", "UK", &["news", "general"]),
                fixtures::channel("RaiNews.it", "Rai News 24", "IT", &["news"]),
                fixtures::channel("Cartoon.us", "Cartoon Network", "US", &["kids"]),
                fixtures::channel("NoStream.fr", "France Info", "FR", &["news"]),
            ])
            .await;
        self.datasets
            .set_streams(vec![
                fixtures::stream("CNN.us", "https://cnn.example/live.m3u8"),
                fixtures::stream("BBCNews.uk", "https://bbc.example/live.m3u8"),
                fixtures::stream("RaiNews.it", "https://rai.example/live.m3u8"),
                fixtures::stream("Cartoon.us", "https://cartoon.example/live.m3u8"),
            ])
            .await;
        self.datasets
            .set_countries(vec![
                fixtures::country("US", "United States"),
                fixtures::country("UK", "United Kingdom"),
                fixtures::country("IT", "Italy"),
                fixtures::country("FR", "France"),
            ])
            .await;
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path).await
    }

    /// Send a POST request without a body.
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request("POST", path).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    /// Leave music search unconfigured
    pub disable_music: bool,
    /// Game directories to create in the games dir
    pub games: Vec<String>,
}

impl TestConfig {
    /// Create config with music search disabled.
    pub fn without_music() -> Self {
        Self {
            disable_music: true,
            ..Default::default()
        }
    }

    /// Create config with the given local games.
    pub fn with_games(slugs: &[&str]) -> Self {
        Self {
            games: slugs.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            $response.text
        );
    };
}
