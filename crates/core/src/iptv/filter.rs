//! Ordered predicate pipeline deciding which channels a search returns.
//!
//! Filters run in the order they were added and stop at the first rejection.
//! The pipeline built for a search always starts with the stream checks,
//! followed by the country, category and name filters that are set.

use super::index::ChannelStreamIndex;
use super::types::{Channel, CountryTable, SearchQuery, Stream};
use crate::config::CountryMatch;

/// A channel joined with its streams and resolved country name.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub channel: &'a Channel,
    pub streams: &'a [Stream],
    pub country_name: Option<&'a str>,
}

impl<'a> Candidate<'a> {
    /// Join a channel against the stream index and country table.
    pub fn join(
        channel: &'a Channel,
        index: &'a ChannelStreamIndex,
        countries: &'a CountryTable,
    ) -> Self {
        let country_name = if channel.country.is_empty() {
            None
        } else {
            countries.name_of(&channel.country)
        };

        Self {
            channel,
            streams: index.streams_for(&channel.id),
            country_name,
        }
    }

    /// The stream selected for playback.
    pub fn stream(&self) -> Option<&'a Stream> {
        self.streams.first()
    }
}

/// A single predicate over a [`Candidate`].
///
/// Filter values are stored trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelFilter {
    /// At least one stream is joined to the channel.
    HasStream,
    /// The selected stream has a non-empty URL.
    PlayableUrl,
    /// Country code or name matches.
    Country { value: String, mode: CountryMatch },
    /// Category list contains the value.
    Category(String),
    /// Channel name contains the value.
    NameContains(String),
}

impl ChannelFilter {
    pub fn country(value: &str, mode: CountryMatch) -> Self {
        ChannelFilter::Country {
            value: normalize(value),
            mode,
        }
    }

    pub fn category(value: &str) -> Self {
        ChannelFilter::Category(normalize(value))
    }

    pub fn name_contains(value: &str) -> Self {
        ChannelFilter::NameContains(normalize(value))
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            ChannelFilter::HasStream => "has_stream",
            ChannelFilter::PlayableUrl => "playable_url",
            ChannelFilter::Country { .. } => "country",
            ChannelFilter::Category(_) => "category",
            ChannelFilter::NameContains(_) => "name",
        }
    }

    pub fn matches(&self, candidate: &Candidate<'_>) -> bool {
        match self {
            ChannelFilter::HasStream => !candidate.streams.is_empty(),
            ChannelFilter::PlayableUrl => candidate
                .stream()
                .map(|s| !s.url.is_empty())
                .unwrap_or(false),
            ChannelFilter::Country { value, mode } => country_matches(candidate, value, *mode),
            ChannelFilter::Category(value) => candidate
                .channel
                .categories
                .iter()
                .any(|c| c.to_lowercase() == *value),
            ChannelFilter::NameContains(value) => {
                candidate.channel.name.to_lowercase().contains(value.as_str())
            }
        }
    }
}

fn country_matches(candidate: &Candidate<'_>, value: &str, mode: CountryMatch) -> bool {
    let code = &candidate.channel.country;
    if !code.is_empty() && code.to_lowercase() == value {
        return true;
    }

    let Some(name) = candidate.country_name.filter(|n| !n.is_empty()) else {
        return false;
    };
    let name = name.to_lowercase();

    match mode {
        CountryMatch::Fuzzy => name.contains(value) || name.starts_with(value),
        CountryMatch::Exact => name == value,
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Filters applied in sequence with short-circuit evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPipeline {
    filters: Vec<ChannelFilter>,
}

impl FilterPipeline {
    /// An empty pipeline accepting every candidate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the pipeline for a search. Blank filter values are left out.
    pub fn for_query(query: &SearchQuery, country_match: CountryMatch) -> Self {
        let mut pipeline = Self::new()
            .with(ChannelFilter::HasStream)
            .with(ChannelFilter::PlayableUrl);

        if let Some(country) = query.country.as_deref().filter(|c| !c.trim().is_empty()) {
            pipeline = pipeline.with(ChannelFilter::country(country, country_match));
        }
        if let Some(category) = query.category.as_deref().filter(|c| !c.trim().is_empty()) {
            pipeline = pipeline.with(ChannelFilter::category(category));
        }
        if !query.text.trim().is_empty() {
            pipeline = pipeline.with(ChannelFilter::name_contains(&query.text));
        }

        pipeline
    }

    /// Append a filter to the end of the pipeline.
    pub fn with(mut self, filter: ChannelFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(&self) -> &[ChannelFilter] {
        &self.filters
    }

    /// The first filter rejecting the candidate, if any.
    pub fn first_rejection(&self, candidate: &Candidate<'_>) -> Option<&ChannelFilter> {
        self.filters.iter().find(|f| !f.matches(candidate))
    }
}
