// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for doc-search.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The host application is responsible for choosing the exporter (Prometheus, OTEL, etc.)
//!
//! # Metric Naming Convention
//! - `doc_search_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `index`: index name the executor is bound to
//! - `intent`: filter, blend, query
//! - `status`: success, error, no_documents

use metrics::{counter, histogram};
use std::time::{Duration, Instant};

/// Record a search call outcome
pub fn record_search_query(index: &str, intent: &str, status: &str) {
    counter!(
        "doc_search_queries_total",
        "index" => index.to_string(),
        "intent" => intent.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record search latency
pub fn record_search_latency(index: &str, duration: Duration) {
    histogram!(
        "doc_search_query_seconds",
        "index" => index.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Record records returned on one page
pub fn record_search_results(count: usize) {
    histogram!("doc_search_results").record(count as f64);
}

/// Record total hits reported by the index
pub fn record_search_total_hits(total: u64) {
    histogram!("doc_search_total_hits").record(total as f64);
}

/// Record a hit dropped during hydration
pub fn record_decode_skipped(reason: &str) {
    counter!(
        "doc_search_decode_skipped_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// A timing guard that records search latency on drop
pub struct LatencyTimer {
    index: String,
    start: Instant,
}

impl LatencyTimer {
    /// Start a new latency timer
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_search_latency(&self.index, self.start.elapsed());
    }
}
