//! IPTV channel catalog built from the IPTV-org public datasets.
//!
//! Three datasets (channels, streams, countries) are fetched lazily through a
//! [`DatasetSource`], cached by [`DatasetCache`], joined by channel id and
//! filtered by [`IptvCatalog::search`].

mod cache;
mod filter;
mod index;
mod service;
mod source;
mod types;

pub use cache::DatasetCache;
pub use filter::{Candidate, ChannelFilter, FilterPipeline};
pub use index::ChannelStreamIndex;
pub use service::IptvCatalog;
pub use source::HttpDatasetSource;
pub use types::*;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when fetching an IPTV dataset.
#[derive(Debug, Error)]
pub enum IptvError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Dataset host returned a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// The three upstream datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Channels,
    Streams,
    Countries,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Channels => "channels",
            Dataset::Streams => "streams",
            Dataset::Countries => "countries",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider of the raw IPTV datasets.
///
/// Any backend returning the IPTV-org JSON shapes is interchangeable.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch the full channel catalog.
    async fn fetch_channels(&self) -> Result<Vec<Channel>, IptvError>;

    /// Fetch the full stream catalog.
    async fn fetch_streams(&self) -> Result<Vec<Stream>, IptvError>;

    /// Fetch the country list.
    async fn fetch_countries(&self) -> Result<Vec<Country>, IptvError>;
}
