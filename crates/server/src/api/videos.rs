//! IPTV channel search and filter metadata handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use mediahub_core::{ChannelResult, CountryEntry, SearchQuery, DEFAULT_MAX_RESULTS};
use serde::Deserialize;

use crate::state::AppState;

/// Upper bound for `max_results` accepted from clients.
const MAX_RESULTS_LIMIT: usize = 200;

#[derive(Debug, Deserialize)]
pub struct VideoSearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

impl VideoSearchParams {
    fn into_query(self) -> SearchQuery {
        SearchQuery {
            text: self.q,
            max_results: self.max_results.min(MAX_RESULTS_LIMIT),
            country: self.country,
            category: self.category,
        }
    }
}

/// GET /api/v1/videos/search
///
/// Search IPTV channels by name, country and category.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VideoSearchParams>,
) -> Json<Vec<ChannelResult>> {
    let query = params.into_query();
    Json(state.iptv().search(&query).await)
}

/// GET /api/v1/videos/countries
pub async fn list_countries(State(state): State<Arc<AppState>>) -> Json<Vec<CountryEntry>> {
    Json(state.iptv().list_countries().await)
}

/// GET /api/v1/videos/categories
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.iptv().list_categories().await)
}

/// POST /api/v1/videos/refresh
///
/// Drop the cached datasets; the next request fetches them again.
pub async fn refresh(State(state): State<Arc<AppState>>) -> StatusCode {
    state.iptv().refresh().await;
    StatusCode::NO_CONTENT
}
