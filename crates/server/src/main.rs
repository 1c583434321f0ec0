use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediahub_core::{
    load_config, validate_config, DatasetCache, DatasetSource, DeezerClient, GamesLibrary,
    HttpDatasetSource, IptvCatalog, MusicCatalog, MusicProvider,
};
use mediahub_server::{api::create_router, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("MEDIAHUB_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Channel catalog: {}", config.iptv.channels_url);
    info!("Country filter mode: {:?}", config.iptv.country_match);

    // IPTV datasets are fetched lazily on first use
    let source: Arc<dyn DatasetSource> = Arc::new(
        HttpDatasetSource::new(&config.iptv).context("Failed to create IPTV dataset client")?,
    );
    let cache = Arc::new(DatasetCache::new(source));
    let iptv = IptvCatalog::new(cache).with_country_match(config.iptv.country_match);

    // Music search is optional; the rest of the service runs without it
    let music = if config.music.enabled {
        match DeezerClient::new(&config.music) {
            Ok(client) => {
                info!("Initializing Deezer client at {}", config.music.base_url);
                let provider: Arc<dyn MusicProvider> = Arc::new(client);
                Some(MusicCatalog::new(provider))
            }
            Err(e) => {
                error!("Failed to create Deezer client: {}", e);
                None
            }
        }
    } else {
        info!("Music search disabled in config");
        None
    };

    let games = GamesLibrary::new(&config.games);
    if !games.dir().exists() {
        warn!("Games directory {:?} does not exist", games.dir());
    }

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), iptv, music, games));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
