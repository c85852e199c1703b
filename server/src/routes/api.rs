use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "backend": &*state.backend_url,
        "started_at": state.started_at.to_rfc3339(),
        "observability": {
            "forwarded_requests_total": observability.forwarded_requests_total,
            "upstream_errors_total": observability.upstream_errors_total,
            "upstream_timeouts_total": observability.upstream_timeouts_total,
        }
    }))
}

/// Unknown `/api/*` paths must not fall through to the static bundle.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
