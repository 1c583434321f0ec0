//! Mock IPTV dataset source for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::iptv::{Channel, Country, Dataset, DatasetSource, IptvError, Stream};

/// Mock implementation of the DatasetSource trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable channels, streams and countries
/// - Count fetches per dataset
/// - Simulate upstream failures
///
/// # Example
///
/// ```rust,ignore
/// use mediahub_core::testing::{MockDatasetSource, fixtures};
///
/// let source = MockDatasetSource::new();
/// source.set_channels(vec![fixtures::channel("CNN.us", "CNN", "US", &["news"])]).await;
/// source.fail_next(Dataset::Streams).await;
/// ```
#[derive(Debug, Default)]
pub struct MockDatasetSource {
    channels: Arc<RwLock<Vec<Channel>>>,
    streams: Arc<RwLock<Vec<Stream>>>,
    countries: Arc<RwLock<Vec<Country>>>,
    /// Fetch attempts per dataset, failures included.
    fetches: Arc<RwLock<HashMap<Dataset, usize>>>,
    /// Datasets whose next fetch fails.
    failing: Arc<RwLock<HashSet<Dataset>>>,
}

impl MockDatasetSource {
    /// Create a new mock with empty datasets.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_channels(&self, channels: Vec<Channel>) {
        *self.channels.write().await = channels;
    }

    pub async fn set_streams(&self, streams: Vec<Stream>) {
        *self.streams.write().await = streams;
    }

    pub async fn set_countries(&self, countries: Vec<Country>) {
        *self.countries.write().await = countries;
    }

    /// Make the next fetch of `dataset` fail.
    pub async fn fail_next(&self, dataset: Dataset) {
        self.failing.write().await.insert(dataset);
    }

    /// Number of fetches attempted for `dataset`.
    pub async fn fetch_count(&self, dataset: Dataset) -> usize {
        self.fetches
            .read()
            .await
            .get(&dataset)
            .copied()
            .unwrap_or(0)
    }

    /// Record a fetch and return the simulated failure if one is pending.
    async fn begin_fetch(&self, dataset: Dataset) -> Result<(), IptvError> {
        *self.fetches.write().await.entry(dataset).or_insert(0) += 1;

        if self.failing.write().await.remove(&dataset) {
            return Err(IptvError::ApiError {
                status: 503,
                message: format!("simulated {} failure", dataset),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DatasetSource for MockDatasetSource {
    async fn fetch_channels(&self) -> Result<Vec<Channel>, IptvError> {
        self.begin_fetch(Dataset::Channels).await?;
        Ok(self.channels.read().await.clone())
    }

    async fn fetch_streams(&self) -> Result<Vec<Stream>, IptvError> {
        self.begin_fetch(Dataset::Streams).await?;
        Ok(self.streams.read().await.clone())
    }

    async fn fetch_countries(&self) -> Result<Vec<Country>, IptvError> {
        self.begin_fetch(Dataset::Countries).await?;
        Ok(self.countries.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_mock_counts_and_fails_once() {
        let source = MockDatasetSource::new();
        source
            .set_streams(vec![fixtures::stream("A.us", "http://a/1")])
            .await;
        source.fail_next(Dataset::Streams).await;

        assert!(source.fetch_streams().await.is_err());
        assert_eq!(source.fetch_streams().await.unwrap().len(), 1);
        assert_eq!(source.fetch_count(Dataset::Streams).await, 2);
        assert_eq!(source.fetch_count(Dataset::Channels).await, 0);
    }
}
