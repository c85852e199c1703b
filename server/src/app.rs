use std::path::Path;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
    routing::{any, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::config;
use crate::routes::{api, gateway};
use crate::state::AppState;

pub(crate) fn build_app(state: AppState, static_dir: &str) -> Router {
    let index = Path::new(static_dir).join("index.html");
    let static_assets = Router::new()
        .fallback_service(
            ServeDir::new(static_dir)
                .precompressed_br()
                .precompressed_gzip()
                .fallback(ServeFile::new(index)),
        )
        .layer(middleware::from_fn(set_static_cache_control));

    let app = Router::new()
        .route("/api/health", get(api::health))
        .route(gateway::TRENDS_PATH, get(gateway::get_trends))
        .route(
            gateway::RANKING_PATH,
            post(gateway::post_ranking).layer(DefaultBodyLimit::max(config::max_body_bytes())),
        )
        .route(
            gateway::DASHBOARD_METRICS_PATH,
            get(gateway::get_dashboard_metrics),
        )
        .route(gateway::EXPORT_PDF_PATH, get(gateway::get_export_pdf))
        .route(gateway::EXPORT_EXCEL_PATH, get(gateway::get_export_excel))
        .route("/api/{*path}", any(api::not_found));

    app.layer(CompressionLayer::new())
        .fallback_service(static_assets)
        .with_state(state)
}

async fn set_static_cache_control(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    if response.status().is_success()
        && let Some(cache_control) = cache_control_for_path(&path)
    {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(cache_control),
        );
    }

    response
}

fn cache_control_for_path(path: &str) -> Option<&'static str> {
    if is_hashed_bundle_asset(path) {
        return Some("public, max-age=31536000, immutable");
    }

    if ["/icons/", "/fonts/", "/images/"]
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        return Some("public, max-age=86400");
    }

    None
}

/// Trunk names bundle outputs `<name>-<hash>`, so a long hex segment marks a
/// file whose contents never change under the same URL.
fn is_hashed_bundle_asset(path: &str) -> bool {
    let path = Path::new(path);
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    if !matches!(ext, "wasm" | "js" | "css") {
        return false;
    }
    let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };

    filename
        .split(['-', '_', '.'])
        .any(|segment| segment.len() >= 8 && segment.chars().all(|c| c.is_ascii_hexdigit()))
}
