use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub iptv: IptvConfig,
    #[serde(default)]
    pub music: MusicConfig,
    #[serde(default)]
    pub games: GamesConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// IPTV-org dataset configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IptvConfig {
    /// Channel catalog endpoint
    #[serde(default = "default_channels_url")]
    pub channels_url: String,
    /// Stream catalog endpoint
    #[serde(default = "default_streams_url")]
    pub streams_url: String,
    /// Country catalog endpoint
    #[serde(default = "default_countries_url")]
    pub countries_url: String,
    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_iptv_timeout")]
    pub timeout_secs: u32,
    /// User-Agent sent to the dataset host
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// How the country filter compares against country names
    #[serde(default)]
    pub country_match: CountryMatch,
}

impl Default for IptvConfig {
    fn default() -> Self {
        Self {
            channels_url: default_channels_url(),
            streams_url: default_streams_url(),
            countries_url: default_countries_url(),
            timeout_secs: default_iptv_timeout(),
            user_agent: default_user_agent(),
            country_match: CountryMatch::default(),
        }
    }
}

fn default_channels_url() -> String {
    "https://iptv-org.github.io/api/channels.json".to_string()
}

fn default_streams_url() -> String {
    "https://iptv-org.github.io/api/streams.json".to_string()
}

fn default_countries_url() -> String {
    "https://iptv-org.github.io/api/countries.json".to_string()
}

fn default_iptv_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("MediaHub/{}", env!("CARGO_PKG_VERSION"))
}

/// Country filter matching mode.
///
/// `fuzzy` accepts a code match, or a country name that contains or starts
/// with the filter value. `exact` accepts a code match or a full name match.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CountryMatch {
    #[default]
    Fuzzy,
    Exact,
}

/// Music search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MusicConfig {
    /// Whether the music provider is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Deezer API base URL
    #[serde(default = "default_music_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 15)
    #[serde(default = "default_music_timeout")]
    pub timeout_secs: u32,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_music_base_url(),
            timeout_secs: default_music_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_music_base_url() -> String {
    "https://api.deezer.com".to_string()
}

fn default_music_timeout() -> u32 {
    15
}

/// Local HTML5 games configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GamesConfig {
    /// Directory holding one sub-directory per game
    #[serde(default = "default_games_dir")]
    pub dir: PathBuf,
    /// URL prefix the games directory is served under
    #[serde(default = "default_games_url_prefix")]
    pub url_prefix: String,
}

impl Default for GamesConfig {
    fn default() -> Self {
        Self {
            dir: default_games_dir(),
            url_prefix: default_games_url_prefix(),
        }
    }
}

fn default_games_dir() -> PathBuf {
    PathBuf::from("static/games")
}

fn default_games_url_prefix() -> String {
    "/static/games".to_string()
}
