use std::rc::Rc;

use ecopack_shared::metrics::MetricField;
use ecopack_shared::{DashboardMetrics, PageConfig, TrendResponse, dashboard_charts};
use wasm_bindgen_futures::spawn_local;

use crate::{api, chart, dom};

/// Whether this page hosts any of the trend charts.
fn has_chart_mounts(config: &PageConfig) -> bool {
    let mounts = &config.charts;
    [&mounts.cost, &mounts.co2, &mounts.suitability, &mounts.usage]
        .into_iter()
        .any(|id| dom::has_element(id))
}

/// Fetch trends once and draw every chart whose canvas is present.
pub fn load(config: Rc<PageConfig>) {
    if !has_chart_mounts(&config) {
        return;
    }

    spawn_local(async move {
        let trends = match api::fetch_json::<TrendResponse>(&config.api.trends).await {
            Ok(trends) => trends,
            Err(e) => {
                dom::error(&format!("Dashboard load failed: {e}"));
                if config.alert_on_dashboard_failure
                    && let Some(window) = web_sys::window()
                {
                    window
                        .alert_with_message("Failed to load dashboard data.")
                        .ok();
                }
                return;
            }
        };

        let charts = dashboard_charts(&trends, &config);
        if charts.is_empty() {
            dom::warn("No dashboard data found.");
            return;
        }

        let drawn = charts.iter().filter(|spec| chart::render(spec)).count();
        web_sys::console::log_1(&format!("Dashboard: {drawn}/{} charts drawn", charts.len()).into());
    });
}

/// Fill the metric fields, if the page has any.
pub fn load_metrics(config: Rc<PageConfig>) {
    let present: Vec<MetricField> = MetricField::ALL
        .into_iter()
        .filter(|field| dom::has_element(config.metrics.id(*field)))
        .collect();
    if present.is_empty() {
        return;
    }

    spawn_local(async move {
        match api::fetch_json::<DashboardMetrics>(&config.api.dashboard_metrics).await {
            Ok(metrics) => {
                for field in present {
                    dom::set_text(config.metrics.id(field), &metrics.text(field));
                }
            }
            Err(e) => dom::error(&format!("Dashboard metrics failed: {e}")),
        }
    });
}
