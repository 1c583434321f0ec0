//! Locally hosted HTML5 games.
//!
//! Every sub-directory of the games directory is a game whose entry point is
//! `index.html`. A fixed external embed is always listed after the local ones.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::config::GamesConfig;

/// Errors that can occur when reading the games library.
#[derive(Debug, Error)]
pub enum GamesError {
    /// No game with this slug.
    #[error("Game not found: {0}")]
    NotFound(String),

    /// Failed to read the games directory.
    #[error("Failed to read games directory {path}")]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A playable game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    /// URL-safe identifier (the directory name for local games).
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Entry point path for local games.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Iframe URL for external games.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    /// Whether the game is served from the local games directory.
    pub local: bool,
}

impl Game {
    fn external_embed() -> Self {
        Self {
            slug: "space-invaders-embed".to_string(),
            title: "Space Invaders (Itch.io embed)".to_string(),
            path: None,
            embed_url: Some("https://itch.io/embed/123456?linkback=true".to_string()),
            local: false,
        }
    }
}

/// Reads games from a directory on each call.
pub struct GamesLibrary {
    dir: PathBuf,
    url_prefix: String,
}

impl GamesLibrary {
    pub fn new(config: &GamesConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            url_prefix: config.url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Local games sorted by slug, followed by the external embed.
    ///
    /// A missing games directory is not an error.
    pub async fn list_games(&self) -> Result<Vec<Game>, GamesError> {
        let mut games = self.local_games().await?;
        games.push(Game::external_embed());
        Ok(games)
    }

    /// Look up a game by slug.
    pub async fn get_game(&self, slug: &str) -> Result<Game, GamesError> {
        self.list_games()
            .await?
            .into_iter()
            .find(|g| g.slug == slug)
            .ok_or_else(|| GamesError::NotFound(slug.to_string()))
    }

    async fn local_games(&self) -> Result<Vec<Game>, GamesError> {
        if !fs::try_exists(&self.dir).await.unwrap_or(false) {
            debug!("Games directory {:?} does not exist", self.dir);
            return Ok(Vec::new());
        }

        let read_err = |source| GamesError::ReadDirFailed {
            path: self.dir.clone(),
            source,
        };

        let mut entries = fs::read_dir(&self.dir).await.map_err(read_err)?;
        let mut games = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }
            let Ok(slug) = entry.file_name().into_string() else {
                continue;
            };

            games.push(Game {
                title: title_from_slug(&slug),
                path: Some(format!("{}/{}/index.html", self.url_prefix, slug)),
                embed_url: None,
                local: true,
                slug,
            });
        }

        games.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(games)
    }
}

/// "space_invaders" -> "Space Invaders"
fn title_from_slug(slug: &str) -> String {
    slug.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
