pub mod config;
pub mod games;
pub mod iptv;
pub mod metrics;
pub mod music;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, CountryMatch,
    GamesConfig, IptvConfig, MusicConfig, ServerConfig,
};
pub use games::{Game, GamesError, GamesLibrary};
pub use iptv::{
    Channel, ChannelResult, Country, CountryEntry, Dataset, DatasetCache, DatasetSource,
    HttpDatasetSource, IptvCatalog, IptvError, SearchQuery, Stream, DEFAULT_MAX_RESULTS,
};
pub use music::{
    DeezerClient, MusicCatalog, MusicError, MusicProvider, Track, DEFAULT_TRACK_LIMIT,
};
