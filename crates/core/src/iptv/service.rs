//! Channel search and metadata over the cached IPTV datasets.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, trace};

use super::cache::DatasetCache;
use super::filter::{Candidate, FilterPipeline};
use super::types::{ChannelResult, CountryEntry, SearchQuery, Stream};
use crate::config::CountryMatch;
use crate::metrics::{CHANNEL_SEARCHES, CHANNEL_SEARCH_RESULTS};

/// Searchable IPTV channel catalog.
pub struct IptvCatalog {
    cache: Arc<DatasetCache>,
    country_match: CountryMatch,
}

impl IptvCatalog {
    pub fn new(cache: Arc<DatasetCache>) -> Self {
        Self {
            cache,
            country_match: CountryMatch::default(),
        }
    }

    /// Set how the country filter compares against country names.
    pub fn with_country_match(mut self, country_match: CountryMatch) -> Self {
        self.country_match = country_match;
        self
    }

    /// Search channels in catalog order, returning at most `max_results` hits.
    ///
    /// Only channels with a playable stream are returned. Upstream failures
    /// show up as an empty catalog, never as an error.
    pub async fn search(&self, query: &SearchQuery) -> Vec<ChannelResult> {
        CHANNEL_SEARCHES.inc();

        if query.max_results == 0 {
            return Vec::new();
        }

        let (channels, index, countries) = futures::join!(
            self.cache.load_channels(),
            self.cache.channel_stream_index(),
            self.cache.load_countries()
        );

        let pipeline = FilterPipeline::for_query(query, self.country_match);
        let mut results = Vec::new();

        for channel in channels.iter() {
            let candidate = Candidate::join(channel, &index, &countries);
            if let Some(filter) = pipeline.first_rejection(&candidate) {
                trace!("Channel {} rejected by {} filter", channel.id, filter.label());
                continue;
            }
            let Some(stream) = candidate.stream() else {
                continue;
            };

            results.push(build_result(&candidate, stream));
            if results.len() >= query.max_results {
                break;
            }
        }

        debug!(
            "Channel search '{}' (country={:?}, category={:?}) returned {} results",
            query.text,
            query.country,
            query.category,
            results.len()
        );
        CHANNEL_SEARCH_RESULTS.observe(results.len() as f64);

        results
    }

    /// All known countries, sorted by name.
    pub async fn list_countries(&self) -> Vec<CountryEntry> {
        self.cache.load_countries().await.sorted_entries()
    }

    /// Distinct categories across the whole catalog, sorted.
    ///
    /// Channels without streams are included.
    pub async fn list_categories(&self) -> Vec<String> {
        let channels = self.cache.load_channels().await;
        channels
            .iter()
            .flat_map(|c| c.categories.iter())
            .filter(|c| !c.is_empty())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Drop cached datasets so the next call fetches fresh data.
    pub async fn refresh(&self) {
        self.cache.invalidate().await;
    }
}

fn build_result(candidate: &Candidate<'_>, stream: &Stream) -> ChannelResult {
    let channel = candidate.channel;
    let categories: Vec<String> = channel
        .categories
        .iter()
        .map(|c| c.to_lowercase())
        .collect();

    let country = match candidate.country_name {
        Some(name) => name.to_string(),
        None => channel.country.clone(),
    };

    ChannelResult {
        id: channel.id.clone(),
        title: channel.name.clone(),
        description: describe(candidate.country_name, &categories),
        thumbnail: channel.logo.clone().unwrap_or_default(),
        embed_url: stream.url.clone(),
        stream_url: stream.url.clone(),
        country,
        country_code: channel.country.clone(),
        categories,
    }
}

/// Summary line shown under a channel, e.g. "Country: Finland | Category: General".
fn describe(country_name: Option<&str>, categories: &[String]) -> String {
    let mut parts = Vec::new();
    if let Some(name) = country_name {
        parts.push(format!("Country: {}", name));
    }
    if !categories.is_empty() {
        let labels: Vec<String> = categories.iter().map(|c| capitalize(c)).collect();
        parts.push(format!("Category: {}", labels.join(", ")));
    }

    if parts.is_empty() {
        "TV Channel".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
