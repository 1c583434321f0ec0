//! HTTP dataset source for the IPTV-org API.
//!
//! The API is a set of static JSON files, each an array of objects.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{Channel, Country, Stream};
use super::{Dataset, DatasetSource, IptvError};
use crate::config::IptvConfig;
use crate::metrics::{EXTERNAL_SERVICE_DURATION, EXTERNAL_SERVICE_REQUESTS};

const SERVICE_NAME: &str = "iptv_org";

/// Fetches the IPTV-org datasets over HTTP.
pub struct HttpDatasetSource {
    client: Client,
    channels_url: String,
    streams_url: String,
    countries_url: String,
}

impl HttpDatasetSource {
    /// Create a new source from configuration.
    pub fn new(config: &IptvConfig) -> Result<Self, IptvError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            channels_url: config.channels_url.clone(),
            streams_url: config.streams_url.clone(),
            countries_url: config.countries_url.clone(),
        })
    }

    fn url_for(&self, dataset: Dataset) -> &str {
        match dataset {
            Dataset::Channels => &self.channels_url,
            Dataset::Streams => &self.streams_url,
            Dataset::Countries => &self.countries_url,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, dataset: Dataset) -> Result<Vec<T>, IptvError> {
        let start = Instant::now();
        let result = self.fetch_inner(dataset).await;

        let status = if result.is_ok() { "success" } else { "error" };
        EXTERNAL_SERVICE_REQUESTS
            .with_label_values(&[SERVICE_NAME, dataset.as_str(), status])
            .inc();
        EXTERNAL_SERVICE_DURATION
            .with_label_values(&[SERVICE_NAME, dataset.as_str()])
            .observe(start.elapsed().as_secs_f64());

        result
    }

    async fn fetch_inner<T: DeserializeOwned>(
        &self,
        dataset: Dataset,
    ) -> Result<Vec<T>, IptvError> {
        let url = self.url_for(dataset);
        debug!("Fetching IPTV {} dataset from {}", dataset, url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IptvError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let values: Vec<Value> = response.json().await.map_err(|e| {
            IptvError::ParseError(format!("Failed to parse {} dataset: {}", dataset, e))
        })?;

        Ok(parse_records(dataset, values))
    }
}

/// Convert raw JSON objects into typed records.
///
/// Bad field values fall back to defaults; entries that are not objects are dropped.
fn parse_records<T: DeserializeOwned>(dataset: Dataset, values: Vec<Value>) -> Vec<T> {
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    let dropped = total - records.len();
    if dropped > 0 {
        warn!(
            "Dropped {} malformed records out of {} in {} dataset",
            dropped, total, dataset
        );
    }

    records
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    async fn fetch_channels(&self) -> Result<Vec<Channel>, IptvError> {
        self.fetch(Dataset::Channels).await
    }

    async fn fetch_streams(&self) -> Result<Vec<Stream>, IptvError> {
        self.fetch(Dataset::Streams).await
    }

    async fn fetch_countries(&self) -> Result<Vec<Country>, IptvError> {
        self.fetch(Dataset::Countries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response and return the base URL.
    async fn serve_once(status_line: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut received = Vec::new();
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                received.extend_from_slice(&buf[..n]);
                if n == 0 || received.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    fn config_pointing_at(base: &str) -> IptvConfig {
        IptvConfig {
            channels_url: format!("{}/channels.json", base),
            streams_url: format!("{}/streams.json", base),
            countries_url: format!("{}/countries.json", base),
            timeout_secs: 5,
            ..IptvConfig::default()
        }
    }

    #[test]
    fn test_parse_records_defaults_bad_fields_and_skips_non_objects() {
        let values = vec![
            json!({"id": "A.us", "name": "A", "country": "US", "categories": ["news"]}),
            json!({"id": "BBC.uk", "name": "BBC", "country": "UK", "categories": "news"}),
            json!("not-a-record"),
            json!(42),
            json!({"id": "C.uk", "name": "C"}),
        ];
        let channels: Vec<Channel> = parse_records(Dataset::Channels, values);
        let ids: Vec<_> = channels.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["A.us", "BBC.uk", "C.uk"]);
        assert!(channels[1].categories.is_empty());
        assert_eq!(channels[1].country, "UK");
    }

    #[tokio::test]
    async fn test_fetch_channels_success() {
        let body = json!([
            {"id": "BBCWorldNews.uk", "name": "BBC World News", "country": "UK", "categories": ["news"]}
        ])
        .to_string();
        let base = serve_once("200 OK", body).await;
        let source = HttpDatasetSource::new(&config_pointing_at(&base)).unwrap();

        let channels = source.fetch_channels().await.unwrap();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "BBC World News");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let base = serve_once("503 Service Unavailable", "down".to_string()).await;
        let source = HttpDatasetSource::new(&config_pointing_at(&base)).unwrap();

        let result = source.fetch_streams().await;
        match result {
            Err(IptvError::ApiError { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "down");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let base = serve_once("200 OK", "{not json".to_string()).await;
        let source = HttpDatasetSource::new(&config_pointing_at(&base)).unwrap();

        let result = source.fetch_countries().await;
        assert!(matches!(result, Err(IptvError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind and drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source =
            HttpDatasetSource::new(&config_pointing_at(&format!("http://{}", addr))).unwrap();
        let result = source.fetch_channels().await;
        assert!(matches!(result, Err(IptvError::HttpError(_))));
    }
}
