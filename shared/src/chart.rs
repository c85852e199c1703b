//! Chart.js configurations for the trends dashboard.

use serde::Serialize;

use crate::colors::{ChartSlot, Theme};
use crate::config::PageConfig;
use crate::trends::{TrendResponse, display_name};

const FILL_ALPHA: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// Top-level object handed to `new Chart(canvas, config)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
    pub fill: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
}

/// A chart and the canvas it belongs on.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub mount_id: String,
    pub config: ChartConfig,
}

impl ChartConfig {
    fn single_series(
        kind: ChartKind,
        labels: Vec<String>,
        label: &str,
        data: Vec<f64>,
        theme: Theme,
        slot: ChartSlot,
    ) -> Self {
        let color = theme.color(slot);
        Self {
            kind,
            data: ChartData {
                labels,
                datasets: vec![Dataset {
                    label: label.to_owned(),
                    data,
                    background_color: color.rgba_css(FILL_ALPHA),
                    border_color: color.rgba_css(1.0),
                    border_width: 1,
                    fill: kind != ChartKind::Line,
                }],
            },
            options: ChartOptions {
                responsive: true,
                scales: Scales {
                    y: Axis {
                        begin_at_zero: true,
                    },
                },
            },
        }
    }
}

/// Build the four dashboard charts, or none when there is nothing to plot.
pub fn dashboard_charts(trends: &TrendResponse, config: &PageConfig) -> Vec<ChartSpec> {
    if trends.is_empty() {
        return Vec::new();
    }

    let theme = config.theme;
    let materials: Vec<String> = trends
        .comparison
        .iter()
        .map(|row| display_name(&row.material_name))
        .collect();
    let costs = trends.comparison.iter().map(|row| row.cost_rupees).collect();
    let co2 = trends.comparison.iter().map(|row| row.co2_score).collect();
    let suitability = trends
        .comparison
        .iter()
        .map(|row| row.suitability_score)
        .collect();
    let usage_materials = trends
        .usage_trend
        .iter()
        .map(|row| display_name(&row.material_name))
        .collect();
    let usage_counts = trends.usage_trend.iter().map(|row| row.count).collect();

    let mounts = &config.charts;
    vec![
        ChartSpec {
            mount_id: mounts.cost.clone(),
            config: ChartConfig::single_series(
                ChartKind::Bar,
                materials.clone(),
                "Cost (₹)",
                costs,
                theme,
                ChartSlot::Cost,
            ),
        },
        ChartSpec {
            mount_id: mounts.co2.clone(),
            config: ChartConfig::single_series(
                ChartKind::Bar,
                materials.clone(),
                "CO₂ Score",
                co2,
                theme,
                ChartSlot::Co2,
            ),
        },
        ChartSpec {
            mount_id: mounts.suitability.clone(),
            config: ChartConfig::single_series(
                ChartKind::Line,
                materials,
                "Suitability Score",
                suitability,
                theme,
                ChartSlot::Suitability,
            ),
        },
        ChartSpec {
            mount_id: mounts.usage.clone(),
            config: ChartConfig::single_series(
                ChartKind::Bar,
                usage_materials,
                "Usage Count",
                usage_counts,
                theme,
                ChartSlot::Usage,
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{ChartKind, dashboard_charts};
    use crate::config::PageConfig;
    use crate::trends::TrendResponse;

    fn trends() -> TrendResponse {
        serde_json::from_str(
            r#"{
                "comparison": [
                    {"material_name": "Kraft Paper", "cost_rupees": 10, "co2_score": 2, "suitability_score": 7},
                    {"cost_rupees": "20", "co2_score": 4, "suitability_score": 9}
                ],
                "usage_trend": [{"material_name": "Kraft Paper", "count": 3}]
            }"#,
        )
        .expect("trends")
    }

    #[test]
    fn empty_trends_build_no_charts() {
        let charts = dashboard_charts(&TrendResponse::default(), &PageConfig::default());
        assert!(charts.is_empty());
    }

    #[test]
    fn builds_four_charts_on_default_mounts() {
        let charts = dashboard_charts(&trends(), &PageConfig::default());
        let ids: Vec<&str> = charts.iter().map(|c| c.mount_id.as_str()).collect();
        assert_eq!(ids, ["costChart", "co2Chart", "suitabilityChart", "usageChart"]);
        assert_eq!(charts[2].config.kind, ChartKind::Line);
        assert!(!charts[2].config.data.datasets[0].fill);
        assert!(charts[0].config.data.datasets[0].fill);
    }

    #[test]
    fn labels_fall_back_and_values_are_coerced() {
        let charts = dashboard_charts(&trends(), &PageConfig::default());
        assert_eq!(charts[0].config.data.labels, ["Kraft Paper", "N/A"]);
        assert_eq!(charts[0].config.data.datasets[0].data, [10.0, 20.0]);
        assert_eq!(charts[3].config.data.labels, ["Kraft Paper"]);
        assert_eq!(charts[3].config.data.datasets[0].data, [3.0]);
    }

    #[test]
    fn usage_only_still_builds_all_charts() {
        let trends: TrendResponse =
            serde_json::from_str(r#"{"usage_trend": [{"material_name": "Jute", "count": 1}]}"#)
                .expect("trends");
        let charts = dashboard_charts(&trends, &PageConfig::default());
        assert_eq!(charts.len(), 4);
        assert!(charts[0].config.data.labels.is_empty());
    }

    #[test]
    fn serializes_to_chart_js_shape() {
        let charts = dashboard_charts(&trends(), &PageConfig::default());
        let value = serde_json::to_value(&charts[0].config).expect("json");
        assert_eq!(value["type"], "bar");
        assert_eq!(value["options"]["scales"]["y"]["beginAtZero"], true);
        let dataset = &value["data"]["datasets"][0];
        assert_eq!(dataset["label"], "Cost (₹)");
        assert_eq!(dataset["backgroundColor"], "rgba(255, 99, 132, 0.6)");
        assert_eq!(dataset["borderColor"], "rgba(255, 99, 132, 1)");
        assert_eq!(dataset["borderWidth"], 1);
    }
}
