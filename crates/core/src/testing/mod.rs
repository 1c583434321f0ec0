//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external data traits,
//! allowing catalog and API tests without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use mediahub_core::testing::{fixtures, MockDatasetSource, MockMusicProvider};
//!
//! let source = MockDatasetSource::new();
//! source.set_channels(vec![fixtures::channel("CNN.us", "CNN", "US", &["news"])]).await;
//! source.set_streams(vec![fixtures::stream("CNN.us", "http://cnn/live.m3u8")]).await;
//!
//! let music = MockMusicProvider::new();
//! music.set_tracks(vec![fixtures::track("1", "One More Time", "Daft Punk")]).await;
//! ```

mod mock_dataset_source;
mod mock_music_provider;

pub use mock_dataset_source::MockDatasetSource;
pub use mock_music_provider::MockMusicProvider;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::iptv::{Channel, Country, Stream};
    use crate::music::Track;

    /// Create a test channel with a logo derived from its id.
    pub fn channel(id: &str, name: &str, country: &str, categories: &[&str]) -> Channel {
        Channel {
            id: id.to_string(),
            name: name.to_string(),
            country: country.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            logo: Some(format!("https://logos.example/{}.png", id)),
        }
    }

    /// Create a test stream linked to a channel.
    pub fn stream(channel_id: &str, url: &str) -> Stream {
        Stream {
            channel: Some(channel_id.to_string()),
            url: url.to_string(),
            title: None,
            quality: None,
        }
    }

    /// Create a test country.
    pub fn country(code: &str, name: &str) -> Country {
        Country {
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    /// Create a test track.
    pub fn track(id: &str, name: &str, artists: &str) -> Track {
        Track {
            id: id.to_string(),
            name: name.to_string(),
            artists: artists.to_string(),
            preview_url: None,
            embed_url: Some(format!("https://widget.deezer.com/widget/dark/track/{}", id)),
        }
    }
}
