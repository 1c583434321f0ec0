use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Dataset and music endpoints are http(s) URLs
/// - Timeouts are not 0
/// - Games URL prefix is an absolute path other than `/`
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    for (key, url) in [
        ("iptv.channels_url", &config.iptv.channels_url),
        ("iptv.streams_url", &config.iptv.streams_url),
        ("iptv.countries_url", &config.iptv.countries_url),
        ("music.base_url", &config.music.base_url),
    ] {
        if !is_http_url(url) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be an http(s) URL, got '{}'",
                key, url
            )));
        }
    }

    if config.iptv.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "iptv.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.music.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "music.timeout_secs cannot be 0".to_string(),
        ));
    }

    let prefix = config.games.url_prefix.trim_end_matches('/');
    if !prefix.starts_with('/') {
        return Err(ConfigError::ValidationError(format!(
            "games.url_prefix must be an absolute path other than '/', got '{}'",
            config.games.url_prefix
        )));
    }

    Ok(())
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
