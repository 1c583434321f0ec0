use mediahub_core::{Config, GamesLibrary, IptvCatalog, MusicCatalog};

/// Shared application state
pub struct AppState {
    config: Config,
    iptv: IptvCatalog,
    music: Option<MusicCatalog>,
    games: GamesLibrary,
}

impl AppState {
    pub fn new(
        config: Config,
        iptv: IptvCatalog,
        music: Option<MusicCatalog>,
        games: GamesLibrary,
    ) -> Self {
        Self {
            config,
            iptv,
            music,
            games,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn iptv(&self) -> &IptvCatalog {
        &self.iptv
    }

    /// Music search, absent when disabled in config or the client failed to build.
    pub fn music(&self) -> Option<&MusicCatalog> {
        self.music.as_ref()
    }

    pub fn games(&self) -> &GamesLibrary {
        &self.games
    }
}
