use serde::{Deserialize, Serialize};

use crate::coerce::lenient_f64;
use crate::ranking::{fixed, rupees};

/// Payload of `GET /api/dashboard-metrics`, also embedded in ranking responses.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardMetrics {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_co2: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_cost: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_suitability: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub co2_reduction_percent: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost_savings_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    AvgCo2,
    AvgCost,
    AvgSuitability,
    Co2Reduction,
    CostSavings,
}

impl MetricField {
    pub const ALL: [Self; 5] = [
        Self::AvgCo2,
        Self::AvgCost,
        Self::AvgSuitability,
        Self::Co2Reduction,
        Self::CostSavings,
    ];
}

impl DashboardMetrics {
    pub fn text(&self, field: MetricField) -> String {
        match field {
            MetricField::AvgCo2 => fixed(self.avg_co2, 2),
            MetricField::AvgCost => rupees(self.avg_cost),
            MetricField::AvgSuitability => fixed(self.avg_suitability, 2),
            MetricField::Co2Reduction => format!("{}%", fixed(self.co2_reduction_percent, 2)),
            MetricField::CostSavings => format!("{}%", fixed(self.cost_savings_percent, 2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DashboardMetrics, MetricField};

    #[test]
    fn formats_each_field() {
        let metrics: DashboardMetrics = serde_json::from_str(
            r#"{"avg_co2": 3.456, "avg_cost": "12", "avg_suitability": 7,
                "co2_reduction_percent": 76.96, "cost_savings_percent": -20}"#,
        )
        .expect("metrics");
        assert_eq!(metrics.text(MetricField::AvgCo2), "3.46");
        assert_eq!(metrics.text(MetricField::AvgCost), "₹ 12.00");
        assert_eq!(metrics.text(MetricField::AvgSuitability), "7.00");
        assert_eq!(metrics.text(MetricField::Co2Reduction), "76.96%");
        assert_eq!(metrics.text(MetricField::CostSavings), "-20.00%");
    }

    #[test]
    fn empty_object_is_all_zero() {
        let metrics: DashboardMetrics = serde_json::from_str("{}").expect("metrics");
        assert_eq!(metrics, DashboardMetrics::default());
    }
}
