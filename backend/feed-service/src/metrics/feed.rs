//! Feed Ranking Metrics

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter_vec, Histogram, HistogramVec,
    IntCounterVec,
};
use std::time::Duration;

static FEED_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "feed_requests_total",
        "Total personalized feed requests by outcome",
        &["status"]
    )
    .expect("Failed to register feed requests metric")
});

static FEED_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "feed_request_duration_seconds",
        "Time to build one personalized feed page",
        &["status"],
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register feed duration metric")
});

static FEED_CANDIDATES_SCORED: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "feed_candidates_scored",
        "Candidate posts scored per feed request",
        vec![0.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0]
    )
    .expect("Failed to register feed candidates metric")
});

/// Record a finished feed request (ok/not_found/invalid/dependency_error/error)
pub fn record_feed_request(status: &str, duration: Duration) {
    FEED_REQUESTS_TOTAL.with_label_values(&[status]).inc();
    FEED_REQUEST_DURATION_SECONDS
        .with_label_values(&[status])
        .observe(duration.as_secs_f64());
}

/// Record how many candidates one request scored
pub fn record_candidates_scored(count: usize) {
    FEED_CANDIDATES_SCORED.observe(count as f64);
}
