//! Types for the IPTV-org datasets and normalized search results.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Default number of results returned by a channel search.
pub const DEFAULT_MAX_RESULTS: usize = 12;

/// Deserialize a field leniently: `null` or a value of the wrong type
/// becomes the field's default instead of rejecting the whole record.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn default_channel_name() -> String {
    "Unknown Channel".to_string()
}

fn channel_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value::<Option<String>>(value)
        .ok()
        .flatten()
        .unwrap_or_else(default_channel_name))
}

// ============================================================================
// Upstream records
// ============================================================================

/// A TV channel from `channels.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Channel {
    /// Channel identifier (e.g. "BBCWorldNews.uk").
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    /// Display name.
    #[serde(default = "default_channel_name", deserialize_with = "channel_name")]
    pub name: String,
    /// ISO country code.
    #[serde(default, deserialize_with = "lenient")]
    pub country: String,
    /// Category slugs (e.g. "news", "sports").
    #[serde(default, deserialize_with = "lenient")]
    pub categories: Vec<String>,
    /// Logo URL.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// A playable stream from `streams.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stream {
    /// Channel this stream belongs to. Some streams are not linked to any channel.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Stream URL (usually an HLS playlist).
    #[serde(default, deserialize_with = "lenient")]
    pub url: String,
    /// Stream title, when the provider sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Quality label (e.g. "720p").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

/// A country from `countries.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    #[serde(default, deserialize_with = "lenient")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
}

// ============================================================================
// Derived views
// ============================================================================

/// Lookup table from country code to display name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryTable {
    names: HashMap<String, String>,
}

impl CountryTable {
    /// Build the table, dropping records without a code.
    pub fn from_records(records: Vec<Country>) -> Self {
        let names = records
            .into_iter()
            .filter(|c| !c.code.is_empty())
            .map(|c| (c.code, c.name))
            .collect();
        Self { names }
    }

    /// Resolve a country code to its display name.
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All entries sorted by name, ties broken by code.
    pub fn sorted_entries(&self) -> Vec<CountryEntry> {
        let mut entries: Vec<CountryEntry> = self
            .names
            .iter()
            .map(|(code, name)| CountryEntry {
                code: code.clone(),
                name: name.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
        entries
    }
}

/// A `{code, name}` pair for building country pickers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountryEntry {
    pub code: String,
    pub name: String,
}

/// A channel search hit, ready to be rendered by a player page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelResult {
    /// Channel identifier.
    pub id: String,
    /// Channel display name.
    pub title: String,
    /// Human readable summary, e.g. "Country: United Kingdom | Category: News".
    pub description: String,
    /// Logo URL, empty when the channel has none.
    pub thumbnail: String,
    /// URL to embed in the player.
    pub embed_url: String,
    /// Playable stream URL.
    pub stream_url: String,
    /// Country display name (falls back to the code when unknown).
    pub country: String,
    /// Country code as published by the catalog.
    pub country_code: String,
    /// Lowercased category slugs.
    pub categories: Vec<String>,
}

// ============================================================================
// Search input
// ============================================================================

/// Parameters for a channel search.
///
/// Empty strings are treated the same as unset filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Substring to look for in the channel name.
    pub text: String,
    /// Maximum number of results.
    pub max_results: usize,
    /// Country code or (part of a) country name.
    pub country: Option<String>,
    /// Category slug.
    pub category: Option<String>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            max_results: DEFAULT_MAX_RESULTS,
            country: None,
            category: None,
        }
    }
}

impl SearchQuery {
    /// Create a query matching every channel with a stream.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
