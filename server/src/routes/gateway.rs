//! Forwarding of the `/api` surface to the ranking backend.
//!
//! Bodies and status codes pass through untouched. Failures to reach the
//! backend become 502, and a backend that exceeds the upstream timeout
//! becomes 504 so the page can leave its busy state.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use tracing::warn;

use crate::state::AppState;

pub const TRENDS_PATH: &str = "/api/trends";
pub const RANKING_PATH: &str = "/api/ranking";
pub const DASHBOARD_METRICS_PATH: &str = "/api/dashboard-metrics";
pub const EXPORT_PDF_PATH: &str = "/api/export/pdf";
pub const EXPORT_EXCEL_PATH: &str = "/api/export/excel";

pub async fn get_trends(State(state): State<AppState>) -> Result<Response, StatusCode> {
    forward(&state, Method::GET, TRENDS_PATH, None).await
}

pub async fn post_ranking(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, StatusCode> {
    forward(&state, Method::POST, RANKING_PATH, Some(body)).await
}

pub async fn get_dashboard_metrics(State(state): State<AppState>) -> Result<Response, StatusCode> {
    forward(&state, Method::GET, DASHBOARD_METRICS_PATH, None).await
}

pub async fn get_export_pdf(State(state): State<AppState>) -> Result<Response, StatusCode> {
    forward(&state, Method::GET, EXPORT_PDF_PATH, None).await
}

pub async fn get_export_excel(State(state): State<AppState>) -> Result<Response, StatusCode> {
    forward(&state, Method::GET, EXPORT_EXCEL_PATH, None).await
}

async fn forward(
    state: &AppState,
    method: Method,
    path: &'static str,
    json_body: Option<Bytes>,
) -> Result<Response, StatusCode> {
    state.observability.record_forwarded_request();

    let mut request = state.http_client.request(method, state.upstream_url(path));
    if let Some(body) = json_body {
        request = request
            .header(header::CONTENT_TYPE, "application/json")
            .body(body);
    }

    let resp = request
        .send()
        .await
        .map_err(|e| upstream_failure(state, path, &e))?;

    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    if !status.is_success() {
        warn!(path, status = status.as_u16(), "backend returned non-success status");
    }
    let content_type = resp.headers().get(header::CONTENT_TYPE).cloned();
    let disposition = resp.headers().get(header::CONTENT_DISPOSITION).cloned();

    let body = resp
        .bytes()
        .await
        .map_err(|e| upstream_failure(state, path, &e))?;

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        content_type.unwrap_or_else(|| HeaderValue::from_static("application/json")),
    );
    if let Some(disposition) = disposition {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}

fn upstream_failure(state: &AppState, path: &str, e: &reqwest::Error) -> StatusCode {
    if e.is_timeout() {
        state.observability.record_upstream_timeout();
        warn!(path, "backend request timed out");
        StatusCode::GATEWAY_TIMEOUT
    } else {
        state.observability.record_upstream_error();
        warn!(error = %e, path, "backend request failed");
        StatusCode::BAD_GATEWAY
    }
}
