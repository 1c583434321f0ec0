//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - IPTV dataset loads and channel searches
//! - Music searches
//! - External services (IPTV-org, Deezer)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// IPTV Catalog Metrics
// =============================================================================

/// Dataset cache fills by dataset and result.
pub static DATASET_LOADS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mediahub_dataset_loads_total",
            "IPTV dataset cache fills",
        ),
        &["dataset", "result"], // result: "success", "failed"
    )
    .unwrap()
});

/// Channel searches total.
pub static CHANNEL_SEARCHES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "mediahub_channel_searches_total",
        "Total channel searches",
    )
    .unwrap()
});

/// Results returned per channel search.
pub static CHANNEL_SEARCH_RESULTS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "mediahub_channel_search_results",
            "Number of channels returned per search",
        )
        .buckets(vec![0.0, 1.0, 5.0, 12.0, 25.0, 50.0, 100.0]),
    )
    .unwrap()
});

// =============================================================================
// Music Metrics
// =============================================================================

/// Music searches total by result.
pub static MUSIC_SEARCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("mediahub_music_searches_total", "Total music searches"),
        &["result"], // "success", "failed"
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service request duration.
pub static EXTERNAL_SERVICE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "mediahub_external_service_duration_seconds",
            "Duration of external service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["service", "operation"],
    )
    .unwrap()
});

/// External service requests total.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mediahub_external_service_requests_total",
            "Total external service requests",
        ),
        &["service", "operation", "status"], // status: "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // IPTV
        Box::new(DATASET_LOADS.clone()),
        Box::new(CHANNEL_SEARCHES.clone()),
        Box::new(CHANNEL_SEARCH_RESULTS.clone()),
        // Music
        Box::new(MUSIC_SEARCHES.clone()),
        // External services
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_metrics_register_cleanly() {
        let registry = prometheus::Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }
        DATASET_LOADS
            .with_label_values(&["channels", "success"])
            .inc();
        let names: Vec<_> = registry
            .gather()
            .into_iter()
            .map(|f| f.get_name().to_string())
            .collect();
        assert!(names.contains(&"mediahub_dataset_loads_total".to_string()));
    }
}
