//! HTML5 games handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mediahub_core::{Game, GamesError};

use super::handlers::ErrorResponse;
use crate::state::AppState;

/// GET /api/v1/games
pub async fn list_games(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Game>>, (StatusCode, Json<ErrorResponse>)> {
    match state.games().list_games().await {
        Ok(games) => Ok(Json(games)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(e.to_string()),
        )),
    }
}

/// GET /api/v1/games/{slug}
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Game>, (StatusCode, Json<ErrorResponse>)> {
    match state.games().get_game(&slug).await {
        Ok(game) => Ok(Json(game)),
        Err(GamesError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            ErrorResponse::new(format!("Game not found: {}", slug)),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(e.to_string()),
        )),
    }
}
