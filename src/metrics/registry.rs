// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // EDIT METRICS
    // ============================================================================

    /// Edits by outcome
    pub static ref EDITS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("edits_total", "Total number of image edit requests"),
        &["outcome"], // outcome: image, image_and_text, text, blocked, error
        REGISTRY
    ).unwrap();

    /// End-to-end edit duration, including encoding
    pub static ref EDIT_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("edit_duration_seconds", "Image edit duration in seconds")
            .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0, 120.0]),
        &["outcome"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // GEMINI API METRICS
    // ============================================================================

    /// Total Gemini API calls
    pub static ref GEMINI_API_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("gemini_api_calls_total", "Total Gemini API calls"),
        &["model", "status_code"],
        REGISTRY
    ).unwrap();

    /// Gemini API call duration
    pub static ref GEMINI_API_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("gemini_api_duration_seconds", "Gemini API call duration")
            .buckets(vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["model"],
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
