//! Per-dataset cache with get-or-fetch semantics.
//!
//! A successful fetch is kept until [`DatasetCache::invalidate`] is called.
//! A failed fetch is logged, reported as an empty collection and not cached,
//! so the next caller retries.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use super::index::ChannelStreamIndex;
use super::types::{Channel, CountryTable, Stream};
use super::{Dataset, DatasetSource, IptvError};
use crate::metrics::DATASET_LOADS;

type Slot<T> = Mutex<Option<Arc<T>>>;

/// Number of entries in a cached value, for logging.
trait Cardinality {
    fn cardinality(&self) -> usize;
}

impl<T> Cardinality for Vec<T> {
    fn cardinality(&self) -> usize {
        self.len()
    }
}

impl Cardinality for CountryTable {
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Cache for the three IPTV datasets and the derived stream index.
pub struct DatasetCache {
    source: Arc<dyn DatasetSource>,
    channels: Slot<Vec<Channel>>,
    streams: Slot<Vec<Stream>>,
    countries: Slot<CountryTable>,
    stream_index: Slot<ChannelStreamIndex>,
}

impl DatasetCache {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            source,
            channels: Mutex::new(None),
            streams: Mutex::new(None),
            countries: Mutex::new(None),
            stream_index: Mutex::new(None),
        }
    }

    /// The channel catalog, in upstream order.
    pub async fn load_channels(&self) -> Arc<Vec<Channel>> {
        get_or_fetch(&self.channels, Dataset::Channels, || {
            self.source.fetch_channels()
        })
        .await
        .unwrap_or_default()
    }

    /// The stream catalog, in upstream order.
    pub async fn load_streams(&self) -> Arc<Vec<Stream>> {
        self.try_load_streams().await.unwrap_or_default()
    }

    /// The country code to name table.
    pub async fn load_countries(&self) -> Arc<CountryTable> {
        get_or_fetch(&self.countries, Dataset::Countries, || async {
            self.source
                .fetch_countries()
                .await
                .map(CountryTable::from_records)
        })
        .await
        .unwrap_or_default()
    }

    /// Streams grouped by channel id, built once from the stream catalog.
    ///
    /// If the stream catalog cannot be loaded an empty index is returned and
    /// nothing is cached.
    pub async fn channel_stream_index(&self) -> Arc<ChannelStreamIndex> {
        let mut slot = self.stream_index.lock().await;
        if let Some(index) = slot.as_ref() {
            return Arc::clone(index);
        }

        let Some(streams) = self.try_load_streams().await else {
            return Arc::default();
        };

        let index = Arc::new(ChannelStreamIndex::build(&streams));
        info!("Mapped {} channels with streams", index.len());
        *slot = Some(Arc::clone(&index));
        index
    }

    /// Drop every cached dataset and the stream index.
    pub async fn invalidate(&self) {
        *self.channels.lock().await = None;
        *self.streams.lock().await = None;
        *self.countries.lock().await = None;
        *self.stream_index.lock().await = None;
        info!("IPTV dataset cache invalidated");
    }

    async fn try_load_streams(&self) -> Option<Arc<Vec<Stream>>> {
        get_or_fetch(&self.streams, Dataset::Streams, || self.source.fetch_streams()).await
    }
}

/// Return the cached value, or fetch, store and return it.
///
/// The slot stays locked for the duration of the fetch so concurrent callers
/// share one request.
async fn get_or_fetch<T, F, Fut>(slot: &Slot<T>, dataset: Dataset, fetch: F) -> Option<Arc<T>>
where
    T: Cardinality,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, IptvError>>,
{
    let mut guard = slot.lock().await;
    if let Some(value) = guard.as_ref() {
        return Some(Arc::clone(value));
    }

    match fetch().await {
        Ok(value) => {
            info!("Loaded {} {} from IPTV API", value.cardinality(), dataset);
            DATASET_LOADS
                .with_label_values(&[dataset.as_str(), "success"])
                .inc();
            let value = Arc::new(value);
            *guard = Some(Arc::clone(&value));
            Some(value)
        }
        Err(e) => {
            warn!("Failed to load {}: {}", dataset, e);
            DATASET_LOADS
                .with_label_values(&[dataset.as_str(), "failed"])
                .inc();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockDatasetSource};

    fn cache_with(source: &Arc<MockDatasetSource>) -> DatasetCache {
        DatasetCache::new(Arc::clone(source) as Arc<dyn DatasetSource>)
    }

    #[tokio::test]
    async fn test_fetches_once_then_serves_cache() {
        let source = Arc::new(MockDatasetSource::new());
        source
            .set_channels(vec![fixtures::channel("A.us", "Alpha", "US", &["news"])])
            .await;
        let cache = cache_with(&source);

        assert_eq!(cache.load_channels().await.len(), 1);
        assert_eq!(cache.load_channels().await.len(), 1);
        assert_eq!(source.fetch_count(Dataset::Channels).await, 1);
    }

    #[tokio::test]
    async fn test_cached_value_survives_upstream_changes() {
        let source = Arc::new(MockDatasetSource::new());
        source
            .set_channels(vec![fixtures::channel("A.us", "Alpha", "US", &[])])
            .await;
        let cache = cache_with(&source);
        cache.load_channels().await;

        source.set_channels(vec![]).await;
        assert_eq!(cache.load_channels().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_returns_empty_and_retries() {
        let source = Arc::new(MockDatasetSource::new());
        source
            .set_channels(vec![fixtures::channel("A.us", "Alpha", "US", &[])])
            .await;
        source.fail_next(Dataset::Channels).await;
        let cache = cache_with(&source);

        assert!(cache.load_channels().await.is_empty());
        assert_eq!(cache.load_channels().await.len(), 1);
        assert_eq!(source.fetch_count(Dataset::Channels).await, 2);
    }

    #[tokio::test]
    async fn test_countries_become_lookup_table() {
        let source = Arc::new(MockDatasetSource::new());
        source
            .set_countries(vec![fixtures::country("UK", "United Kingdom")])
            .await;
        let cache = cache_with(&source);

        let countries = cache.load_countries().await;
        assert_eq!(countries.name_of("UK"), Some("United Kingdom"));
    }

    #[tokio::test]
    async fn test_stream_index_built_once() {
        let source = Arc::new(MockDatasetSource::new());
        source
            .set_streams(vec![
                fixtures::stream("A.us", "http://a/1"),
                fixtures::stream("A.us", "http://a/2"),
            ])
            .await;
        let cache = cache_with(&source);

        let first = cache.channel_stream_index().await;
        let second = cache.channel_stream_index().await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.streams_for("A.us").len(), 2);
        assert_eq!(source.fetch_count(Dataset::Streams).await, 1);
    }

    #[tokio::test]
    async fn test_stream_index_not_cached_after_failed_fetch() {
        let source = Arc::new(MockDatasetSource::new());
        source
            .set_streams(vec![fixtures::stream("A.us", "http://a/1")])
            .await;
        source.fail_next(Dataset::Streams).await;
        let cache = cache_with(&source);

        assert!(cache.channel_stream_index().await.is_empty());
        assert_eq!(cache.channel_stream_index().await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_first_calls_share_one_fetch() {
        let source = Arc::new(MockDatasetSource::new());
        source
            .set_channels(vec![fixtures::channel("A.us", "Alpha", "US", &[])])
            .await;
        let cache = Arc::new(cache_with(&source));

        let calls = (0..8).map(|_| {
            let cache = Arc::clone(&cache);
            async move { cache.load_channels().await.len() }
        });
        let lengths = futures::future::join_all(calls).await;

        assert!(lengths.iter().all(|&len| len == 1));
        assert_eq!(source.fetch_count(Dataset::Channels).await, 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = Arc::new(MockDatasetSource::new());
        source
            .set_streams(vec![fixtures::stream("A.us", "http://a/1")])
            .await;
        let cache = cache_with(&source);
        cache.channel_stream_index().await;

        source
            .set_streams(vec![
                fixtures::stream("A.us", "http://a/1"),
                fixtures::stream("B.uk", "http://b/1"),
            ])
            .await;
        cache.invalidate().await;

        assert_eq!(cache.channel_stream_index().await.len(), 2);
        assert_eq!(source.fetch_count(Dataset::Streams).await, 2);
    }
}
