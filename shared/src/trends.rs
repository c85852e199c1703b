use serde::{Deserialize, Serialize};

use crate::coerce::{lenient_f64, lenient_label, lenient_vec};

/// Placeholder shown wherever a material has no name.
pub const MISSING_NAME: &str = "N/A";

/// Payload of `GET /api/trends`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendResponse {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub comparison: Vec<ComparisonRow>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub usage_trend: Vec<UsageRow>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub co2_trend: Vec<Co2TrendRow>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub cost_trend: Vec<CostTrendRow>,
}

impl TrendResponse {
    /// Nothing the dashboard can chart.
    pub fn is_empty(&self) -> bool {
        self.comparison.is_empty() && self.usage_trend.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonRow {
    #[serde(default, deserialize_with = "lenient_label")]
    pub material_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost_rupees: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub co2_score: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub suitability_score: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UsageRow {
    #[serde(default, deserialize_with = "lenient_label")]
    pub material_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub count: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Co2TrendRow {
    #[serde(default, deserialize_with = "lenient_label")]
    pub material_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_co2: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostTrendRow {
    #[serde(default, deserialize_with = "lenient_label")]
    pub material_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_cost: f64,
}

pub(crate) fn display_name(name: &Option<String>) -> String {
    name.clone().unwrap_or_else(|| MISSING_NAME.to_owned())
}
