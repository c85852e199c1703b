use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::config::{upstream_connect_timeout, upstream_http_timeout};

#[derive(Clone)]
pub struct AppState {
    pub http_client: reqwest::Client,
    /// Ranking backend base URL, no trailing slash.
    pub backend_url: Arc<str>,
    pub started_at: DateTime<Utc>,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    forwarded_requests_total: AtomicU64,
    upstream_errors_total: AtomicU64,
    upstream_timeouts_total: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservabilitySnapshot {
    pub forwarded_requests_total: u64,
    pub upstream_errors_total: u64,
    pub upstream_timeouts_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            forwarded_requests_total: self.forwarded_requests_total.load(Ordering::Relaxed),
            upstream_errors_total: self.upstream_errors_total.load(Ordering::Relaxed),
            upstream_timeouts_total: self.upstream_timeouts_total.load(Ordering::Relaxed),
        }
    }

    pub fn record_forwarded_request(&self) {
        self.forwarded_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_error(&self) {
        self.upstream_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_timeout(&self) {
        self.upstream_timeouts_total.fetch_add(1, Ordering::Relaxed);
    }
}

impl AppState {
    pub fn new(backend_url: impl Into<Arc<str>>) -> Result<Self, reqwest::Error> {
        let request_timeout = upstream_http_timeout();
        let connect_timeout = upstream_connect_timeout();
        let http_client = reqwest::Client::builder()
            .user_agent("ecopack-server/0.1")
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .or_else(|e| {
                warn!(
                    error = %e,
                    "failed to build configured HTTP client, retrying without custom user-agent"
                );
                reqwest::Client::builder()
                    .timeout(request_timeout)
                    .connect_timeout(connect_timeout)
                    .build()
            })?;
        Ok(Self::with_client(http_client, backend_url))
    }

    pub fn with_client(http_client: reqwest::Client, backend_url: impl Into<Arc<str>>) -> Self {
        Self {
            http_client,
            backend_url: backend_url.into(),
            started_at: Utc::now(),
            observability: Arc::new(ObservabilityCounters::default()),
        }
    }

    /// Absolute backend URL for an `/api/...` path.
    pub fn upstream_url(&self, path: &str) -> String {
        format!("{}{}", self.backend_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, ObservabilityCounters};

    #[test]
    fn upstream_url_joins_base_and_path() {
        let state = AppState::new("http://127.0.0.1:5000").expect("state");
        assert_eq!(
            state.upstream_url("/api/ranking"),
            "http://127.0.0.1:5000/api/ranking"
        );
    }

    #[test]
    fn counters_accumulate() {
        let counters = ObservabilityCounters::default();
        counters.record_forwarded_request();
        counters.record_forwarded_request();
        counters.record_upstream_timeout();
        let snapshot = counters.snapshot();
        assert_eq!(snapshot.forwarded_requests_total, 2);
        assert_eq!(snapshot.upstream_errors_total, 0);
        assert_eq!(snapshot.upstream_timeouts_total, 1);
    }
}
