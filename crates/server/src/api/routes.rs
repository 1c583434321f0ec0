use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::{games, handlers, middleware, music, videos};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let games_dir = state.games().dir().to_path_buf();
    let games_prefix = state.config().games.url_prefix.trim_end_matches('/').to_string();

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // IPTV channels
        .route("/videos/search", get(videos::search))
        .route("/videos/countries", get(videos::list_countries))
        .route("/videos/categories", get(videos::list_categories))
        .route("/videos/refresh", post(videos::refresh))
        // Music
        .route("/music/search", get(music::search))
        // Games
        .route("/games", get(games::list_games))
        .route("/games/{slug}", get(games::get_game))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .nest_service(&games_prefix, ServeDir::new(games_dir))
        .layer(axum_middleware::from_fn(middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
