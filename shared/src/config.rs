//! Page-level settings: where the API lives, which elements to mount into,
//! and how the dashboard is colored.
//!
//! Every field has a default matching the stock templates, and any subset may
//! be overridden from the page.

use serde::{Deserialize, Serialize};

use crate::colors::Theme;
use crate::metrics::MetricField;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub api: ApiPaths,
    pub charts: ChartMounts,
    pub form: FormMounts,
    pub metrics: MetricsMounts,
    pub labels: Labels,
    pub theme: Theme,
    /// Also raise a browser alert when the dashboard fails to load.
    pub alert_on_dashboard_failure: bool,
}

impl PageConfig {
    /// Decode a page override. `null` or an empty object yields the defaults.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiPaths {
    pub trends: String,
    pub ranking: String,
    pub dashboard_metrics: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            trends: "/api/trends".into(),
            ranking: "/api/ranking".into(),
            dashboard_metrics: "/api/dashboard-metrics".into(),
        }
    }
}

/// Canvas element ids for the four dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartMounts {
    pub cost: String,
    pub co2: String,
    pub suitability: String,
    pub usage: String,
}

impl Default for ChartMounts {
    fn default() -> Self {
        Self {
            cost: "costChart".into(),
            co2: "co2Chart".into(),
            suitability: "suitabilityChart".into(),
            usage: "usageChart".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormMounts {
    pub form: String,
    /// CSS selector, the table body has no id of its own.
    pub results_body: String,
    pub summary: String,
    pub kpi_cost: String,
    pub kpi_co2: String,
    pub kpi_suitability: String,
    pub top_container: String,
    pub top_section: String,
    pub submit_button: String,
}

impl Default for FormMounts {
    fn default() -> Self {
        Self {
            form: "recommendationForm".into(),
            results_body: "#resultsTable tbody".into(),
            summary: "predictionSummary".into(),
            kpi_cost: "predCost".into(),
            kpi_co2: "predCO2".into(),
            kpi_suitability: "predSuit".into(),
            top_container: "topMaterialsContainer".into(),
            top_section: "topRecommendations".into(),
            submit_button: "submitBtn".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsMounts {
    pub avg_co2: String,
    pub avg_cost: String,
    pub avg_suitability: String,
    pub co2_reduction: String,
    pub cost_savings: String,
}

impl Default for MetricsMounts {
    fn default() -> Self {
        Self {
            avg_co2: "avgCo2".into(),
            avg_cost: "avgCost".into(),
            avg_suitability: "avgSuitability".into(),
            co2_reduction: "co2Reduction".into(),
            cost_savings: "costSavings".into(),
        }
    }
}

impl MetricsMounts {
    pub fn id(&self, field: MetricField) -> &str {
        match field {
            MetricField::AvgCo2 => &self.avg_co2,
            MetricField::AvgCost => &self.avg_cost,
            MetricField::AvgSuitability => &self.avg_suitability,
            MetricField::Co2Reduction => &self.co2_reduction,
            MetricField::CostSavings => &self.cost_savings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub submit_busy: String,
    /// Used only when the submit control has no text of its own.
    pub submit_idle: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            submit_busy: "Analyzing...".into(),
            submit_idle: "Get AI Recommendations".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::PageConfig;
    use crate::colors::Theme;
    use crate::metrics::MetricField;

    #[test]
    fn null_override_is_default() {
        let config = PageConfig::from_json_value(json!(null)).expect("config");
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = PageConfig::from_json_value(json!({
            "theme": "uniform",
            "charts": {"usage": "usageCanvas"},
            "api": {"ranking": "https://backend.example/api/ranking"}
        }))
        .expect("config");

        assert_eq!(config.theme, Theme::Uniform);
        assert_eq!(config.charts.usage, "usageCanvas");
        assert_eq!(config.charts.cost, "costChart");
        assert_eq!(config.api.ranking, "https://backend.example/api/ranking");
        assert_eq!(config.api.trends, "/api/trends");
        assert_eq!(config.form.results_body, "#resultsTable tbody");
    }

    #[test]
    fn metric_fields_map_to_mount_ids() {
        let config = PageConfig::default();
        assert_eq!(config.metrics.id(MetricField::AvgCo2), "avgCo2");
        assert_eq!(config.metrics.id(MetricField::CostSavings), "costSavings");
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(PageConfig::from_json_value(json!({"theme": 3})).is_err());
    }
}
