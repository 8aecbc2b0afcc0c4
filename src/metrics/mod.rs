// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics, EDITS_TOTAL, EDIT_DURATION, GEMINI_API_CALLS, GEMINI_API_DURATION,
};

/// Helper to record a finished edit; `outcome` is an `EditOutcome` label or `error`
pub fn record_edit(outcome: &str, duration_secs: f64) {
    EDITS_TOTAL.with_label_values(&[outcome]).inc();
    EDIT_DURATION
        .with_label_values(&[outcome])
        .observe(duration_secs);
}

/// Helper to record Gemini API call metrics
///
/// `status_code` is 0 when no HTTP response was received.
pub fn record_gemini_call(model: &str, status_code: u16, duration_secs: f64) {
    GEMINI_API_CALLS
        .with_label_values(&[model, &status_code.to_string()])
        .inc();

    GEMINI_API_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}
