//! Music search handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use mediahub_core::{Track, DEFAULT_TRACK_LIMIT};
use serde::Deserialize;

use super::handlers::ErrorResponse;
use crate::state::AppState;

/// Upper bound for `limit` accepted from clients.
const TRACK_LIMIT_MAX: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct MusicSearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_TRACK_LIMIT
}

/// GET /api/v1/music/search
///
/// Search tracks. Provider failures yield an empty list.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MusicSearchParams>,
) -> Result<Json<Vec<Track>>, (StatusCode, Json<ErrorResponse>)> {
    let Some(music) = state.music() else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorResponse::new("Music search not configured"),
        ));
    };

    let limit = params.limit.min(TRACK_LIMIT_MAX);
    Ok(Json(music.search(&params.q, limit).await))
}
