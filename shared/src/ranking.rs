use serde::{Deserialize, Serialize};

use crate::coerce::{lenient_f64, lenient_label, lenient_object, lenient_u32, lenient_vec};
use crate::error::FetchError;
use crate::metrics::DashboardMetrics;
use crate::trends::display_name;

/// Columns in the results table; message rows span all of them.
pub const RESULT_COLUMNS: u32 = 6;
pub const NO_RESULTS_MESSAGE: &str = "No suitable materials found.";
pub const FAILURE_MESSAGE: &str = "Failed to load recommendations. Please check backend.";
const HIGHLIGHT_COUNT: usize = 3;
const CARD_STAGGER_SECS: f64 = 0.2;

/// Body of `POST /api/ranking`. Field names double as the form control names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RankingRequest {
    pub product_type: String,
    pub product_category: String,
    pub fragility: String,
    pub shipping_type: String,
    pub sustainability_priority: String,
}

impl RankingRequest {
    pub const FIELDS: [&'static str; 5] = [
        "product_type",
        "product_category",
        "fragility",
        "shipping_type",
        "sustainability_priority",
    ];

    /// Collect the request from named form values; unset fields become "".
    pub fn from_fields(mut lookup: impl FnMut(&str) -> Option<String>) -> Self {
        let mut field = |name: &str| lookup(name).unwrap_or_default();
        Self {
            product_type: field("product_type"),
            product_category: field("product_category"),
            fragility: field("fragility"),
            shipping_type: field("shipping_type"),
            sustainability_priority: field("sustainability_priority"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankingResponse {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub ranking: Vec<RankedMaterial>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub metrics: Option<DashboardMetrics>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankedMaterial {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub rank: u32,
    #[serde(default, deserialize_with = "lenient_label")]
    pub material_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost_rupees: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub co2_score: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub suitability_score: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub final_score: f64,
}

impl RankedMaterial {
    /// Backend rank, or the 1-based position when the backend sent none.
    pub fn display_rank(&self, position: usize) -> u32 {
        if self.rank == 0 {
            u32::try_from(position + 1).unwrap_or(u32::MAX)
        } else {
            self.rank
        }
    }
}

/// Fixed-point text rounded like `Number.prototype.toFixed`: an exact tie goes
/// to the larger magnitude, and `-0` prints as `0`.
pub fn fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }

    let magnitude = value.abs();
    // At this precision the expansion is exact, so the first dropped digit decides.
    let precision = exact_fraction_digits(magnitude).max(decimals + 1);
    let exact = format!("{magnitude:.precision$}");
    let Some((int_part, frac_part)) = exact.split_once('.') else {
        return exact;
    };

    let mut digits: Vec<char> = int_part
        .chars()
        .chain(frac_part.chars().take(decimals))
        .collect();
    if frac_part.as_bytes().get(decimals).is_some_and(|d| *d >= b'5') {
        increment_digits(&mut digits);
    }

    let split = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(&digits[..split]);
    if decimals > 0 {
        out.push('.');
        out.extend(&digits[split..]);
    }
    out
}

/// Number of fractional decimal digits in the exact expansion of a finite `f64`.
fn exact_fraction_digits(magnitude: f64) -> usize {
    if magnitude == 0.0 {
        return 0;
    }
    let bits = magnitude.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), biased - 1075)
    };
    let scale = exponent + i64::from(mantissa.trailing_zeros());
    usize::try_from(-scale).unwrap_or(0)
}

fn increment_digits(digits: &mut Vec<char>) {
    for digit in digits.iter_mut().rev() {
        if *digit == '9' {
            *digit = '0';
        } else {
            *digit = char::from(*digit as u8 + 1);
            return;
        }
    }
    digits.insert(0, '1');
}

pub fn rupees(value: f64) -> String {
    format!("₹ {}", fixed(value, 2))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_position(position: usize) -> Option<Self> {
        match position {
            0 => Some(Self::Gold),
            1 => Some(Self::Silver),
            2 => Some(Self::Bronze),
            _ => None,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Gold => "🥇",
            Self::Silver => "🥈",
            Self::Bronze => "🥉",
        }
    }

    pub fn border_class(self) -> &'static str {
        match self {
            Self::Gold => "gold-border",
            Self::Silver => "silver-border",
            Self::Bronze => "bronze-border",
        }
    }
}

/// Pre-formatted text for one material, shared by cards and table rows.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialCells {
    pub rank: u32,
    pub material_name: String,
    pub cost: String,
    pub co2: String,
    pub suitability: String,
    pub final_score: String,
}

impl MaterialCells {
    fn new(item: &RankedMaterial, position: usize) -> Self {
        Self {
            rank: item.display_rank(position),
            material_name: display_name(&item.material_name),
            cost: rupees(item.cost_rupees),
            co2: fixed(item.co2_score, 2),
            suitability: fixed(item.suitability_score, 2),
            final_score: fixed(item.final_score, 3),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightCard {
    pub medal: Option<Medal>,
    pub cells: MaterialCells,
    pub animation_delay_secs: f64,
}

impl HighlightCard {
    pub fn border_class(&self) -> &'static str {
        self.medal.map(Medal::border_class).unwrap_or("")
    }

    pub fn rank_label(&self) -> String {
        match self.medal {
            Some(medal) => format!("{} Rank #{}", medal.icon(), self.cells.rank),
            None => format!("Rank #{}", self.cells.rank),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub cells: MaterialCells,
    /// The best-ranked row is highlighted.
    pub emphasized: bool,
}

/// Averages over every returned entry, not just the highlighted ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiSummary {
    pub avg_cost: f64,
    pub avg_co2: f64,
    pub avg_suitability: f64,
}

impl KpiSummary {
    pub fn from_entries(entries: &[RankedMaterial]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let n = entries.len() as f64;
        let (cost, co2, suitability) = entries.iter().fold((0.0, 0.0, 0.0), |acc, item| {
            (
                acc.0 + item.cost_rupees,
                acc.1 + item.co2_score,
                acc.2 + item.suitability_score,
            )
        });
        Some(Self {
            avg_cost: cost / n,
            avg_co2: co2 / n,
            avg_suitability: suitability / n,
        })
    }

    pub fn cost_text(&self) -> String {
        rupees(self.avg_cost)
    }

    pub fn co2_text(&self) -> String {
        fixed(self.avg_co2, 2)
    }

    pub fn suitability_text(&self) -> String {
        fixed(self.avg_suitability, 2)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingResults {
    pub cards: Vec<HighlightCard>,
    pub rows: Vec<ResultRow>,
    pub summary: KpiSummary,
}

/// Everything the ranking regions show, derived from one response.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RankingView {
    /// Nothing rendered: before the first submission and while one is in flight.
    #[default]
    Cleared,
    Results(RankingResults),
    NoResults,
    Failed,
}

impl RankingView {
    pub fn from_outcome(outcome: Result<RankingResponse, FetchError>) -> Self {
        match outcome {
            Ok(response) => Self::from_response(&response),
            Err(_) => Self::Failed,
        }
    }

    pub fn from_response(response: &RankingResponse) -> Self {
        let entries = &response.ranking;
        let Some(summary) = KpiSummary::from_entries(entries) else {
            return Self::NoResults;
        };

        let cards = entries
            .iter()
            .take(HIGHLIGHT_COUNT)
            .enumerate()
            .map(|(position, item)| HighlightCard {
                medal: Medal::for_position(position),
                cells: MaterialCells::new(item, position),
                animation_delay_secs: position as f64 * CARD_STAGGER_SECS,
            })
            .collect();

        let rows = entries
            .iter()
            .enumerate()
            .map(|(position, item)| ResultRow {
                cells: MaterialCells::new(item, position),
                emphasized: position == 0,
            })
            .collect();

        Self::Results(RankingResults {
            cards,
            rows,
            summary,
        })
    }

    /// Full-width message row text, if this view is a message.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::NoResults => Some(NO_RESULTS_MESSAGE),
            Self::Failed => Some(FAILURE_MESSAGE),
            Self::Cleared | Self::Results(_) => None,
        }
    }

    pub fn results(&self) -> Option<&RankingResults> {
        match self {
            Self::Results(results) => Some(results),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn response(json: &str) -> RankingResponse {
        serde_json::from_str(json).expect("ranking response")
    }

    fn five_entries() -> RankingResponse {
        response(
            r#"{"ranking": [
                {"rank": 1, "material_name": "Mushroom Foam", "cost_rupees": 100, "co2_score": 1.5, "suitability_score": 9, "final_score": 0.9123},
                {"rank": 2, "material_name": "Kraft Paper", "cost_rupees": "200", "co2_score": 2.5, "suitability_score": 8, "final_score": 0.8},
                {"rank": 3, "material_name": "Jute", "cost_rupees": 300, "co2_score": 3.5, "suitability_score": 7, "final_score": 0.7},
                {"rank": 4, "material_name": "Bagasse", "cost_rupees": 400, "co2_score": 4.5, "suitability_score": 6, "final_score": 0.6},
                {"rank": 5, "material_name": "Cornstarch", "cost_rupees": 500, "co2_score": 5.5, "suitability_score": 5, "final_score": 0.5}
            ]}"#,
        )
    }

    #[test]
    fn request_takes_form_values_verbatim() {
        let form: HashMap<&str, &str> = [
            ("product_type", "Electronics"),
            ("product_category", " Phones "),
            ("fragility", "High"),
            ("shipping_type", "Air"),
            ("sustainability_priority", "High"),
        ]
        .into();
        let request = RankingRequest::from_fields(|name| form.get(name).map(|v| v.to_string()));
        assert_eq!(request.product_category, " Phones ");
        assert_eq!(request.shipping_type, "Air");
    }

    #[test]
    fn unset_form_fields_become_empty_strings() {
        let request = RankingRequest::from_fields(|name| {
            (name == "fragility").then(|| "Low".to_owned())
        });
        let json = serde_json::to_value(&request).expect("json");
        for field in RankingRequest::FIELDS {
            assert!(json[field].is_string(), "{field} must be a string");
        }
        assert_eq!(json["fragility"], "Low");
        assert_eq!(json["product_type"], "");
    }

    #[test]
    fn one_row_per_entry_in_backend_order() {
        let view = RankingView::from_response(&five_entries());
        let results = view.results().expect("results");
        let names: Vec<&str> = results
            .rows
            .iter()
            .map(|row| row.cells.material_name.as_str())
            .collect();
        assert_eq!(
            names,
            ["Mushroom Foam", "Kraft Paper", "Jute", "Bagasse", "Cornstarch"]
        );
        assert!(results.rows[0].emphasized);
        assert!(results.rows[1..].iter().all(|row| !row.emphasized));
    }

    #[test]
    fn backend_order_is_not_resorted() {
        let view = RankingView::from_response(&response(
            r#"{"ranking": [{"rank": 2, "material_name": "B"}, {"rank": 1, "material_name": "A"}]}"#,
        ));
        let results = view.results().expect("results");
        assert_eq!(results.rows[0].cells.material_name, "B");
        assert_eq!(results.rows[0].cells.rank, 2);
    }

    #[test]
    fn at_most_three_cards_with_medals() {
        let view = RankingView::from_response(&five_entries());
        let cards = &view.results().expect("results").cards;
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].medal, Some(Medal::Gold));
        assert_eq!(cards[1].medal, Some(Medal::Silver));
        assert_eq!(cards[2].medal, Some(Medal::Bronze));
        assert_eq!(cards[0].border_class(), "gold-border");
        assert_eq!(cards[0].rank_label(), "🥇 Rank #1");
        assert_eq!(cards[2].animation_delay_secs, 0.4);
    }

    #[test]
    fn fewer_entries_give_fewer_cards() {
        let view = RankingView::from_response(&response(
            r#"{"ranking": [{"rank": 1, "material_name": "Only"}]}"#,
        ));
        let results = view.results().expect("results");
        assert_eq!(results.cards.len(), 1);
        assert_eq!(results.rows.len(), 1);
    }

    #[test]
    fn summary_is_mean_over_all_entries() {
        let view = RankingView::from_response(&response(
            r#"{"ranking": [
                {"rank": 1, "cost_rupees": 100, "co2_score": 1, "suitability_score": 3},
                {"rank": 2, "cost_rupees": 200, "co2_score": 2, "suitability_score": 4},
                {"rank": 3, "cost_rupees": 300, "co2_score": 6, "suitability_score": "not a number"}
            ]}"#,
        ));
        let summary = view.results().expect("results").summary;
        assert_eq!(summary.cost_text(), "₹ 200.00");
        assert_eq!(summary.co2_text(), "3.00");
        assert_eq!(summary.suitability_text(), "2.33");
    }

    #[test]
    fn summary_covers_entries_beyond_the_top_three() {
        let summary = RankingView::from_response(&five_entries())
            .results()
            .expect("results")
            .summary;
        assert_eq!(summary.avg_cost, 300.0);
    }

    #[test]
    fn cells_use_fixed_precision() {
        let view = RankingView::from_response(&five_entries());
        let cells = &view.results().expect("results").rows[0].cells;
        assert_eq!(cells.cost, "₹ 100.00");
        assert_eq!(cells.co2, "1.50");
        assert_eq!(cells.suitability, "9.00");
        assert_eq!(cells.final_score, "0.912");
    }

    #[test]
    fn missing_rank_and_name_fall_back() {
        let view = RankingView::from_response(&response(
            r#"{"ranking": [{"rank": 1, "material_name": "A"}, {"cost_rupees": 5}]}"#,
        ));
        let row = &view.results().expect("results").rows[1];
        assert_eq!(row.cells.rank, 2);
        assert_eq!(row.cells.material_name, "N/A");
        assert_eq!(row.cells.final_score, "0.000");
    }

    #[test]
    fn empty_or_missing_ranking_is_no_results() {
        for json in [r#"{"ranking": []}"#, "{}", r#"{"ranking": null}"#] {
            let view = RankingView::from_response(&response(json));
            assert_eq!(view, RankingView::NoResults);
            assert_eq!(view.message(), Some(NO_RESULTS_MESSAGE));
            assert!(view.results().is_none());
        }
    }

    #[test]
    fn fetch_errors_are_failures() {
        for err in [
            FetchError::Status(500),
            FetchError::Transport("offline".into()),
            FetchError::Decode("eof".into()),
        ] {
            let view = RankingView::from_outcome(Err(err));
            assert_eq!(view, RankingView::Failed);
            assert_eq!(view.message(), Some(FAILURE_MESSAGE));
        }
    }

    #[test]
    fn same_response_renders_identically() {
        let first = RankingView::from_outcome(Ok(five_entries()));
        let second = RankingView::from_outcome(Ok(five_entries()));
        assert_eq!(first, second);
    }

    #[test]
    fn metrics_are_optional() {
        let with = response(r#"{"ranking": [], "metrics": {"avg_co2": 2.5}}"#);
        assert_eq!(with.metrics.expect("metrics").avg_co2, 2.5);
        assert!(response(r#"{"ranking": []}"#).metrics.is_none());
        assert!(response(r#"{"ranking": [], "metrics": "n/a"}"#).metrics.is_none());
    }

    #[test]
    fn fixed_folds_negative_zero() {
        assert_eq!(fixed(-0.0, 2), "0.00");
        assert_eq!(fixed(2.5, 3), "2.500");
    }

    #[test]
    fn fixed_rounds_exact_ties_up() {
        assert_eq!(fixed(1.125, 2), "1.13");
        assert_eq!(fixed(0.0625, 3), "0.063");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(-1.125, 2), "-1.13");
    }

    #[test]
    fn fixed_uses_the_exact_binary_value() {
        // 1.005 is stored a little below 1.005.
        assert_eq!(fixed(1.005, 2), "1.00");
        assert_eq!(fixed(9.995, 2), "9.99");
        assert_eq!(fixed(0.9123, 3), "0.912");
    }

    #[test]
    fn fixed_carries_through_nines() {
        assert_eq!(fixed(9.995_000_000_1, 2), "10.00");
        assert_eq!(fixed(99.5, 0), "100");
        assert_eq!(fixed(0.0, 0), "0");
    }

    #[test]
    fn kpi_means_on_ties_match_browser_rounding() {
        let view = RankingView::from_response(&response(
            r#"{"ranking": [
                {"rank": 1, "cost_rupees": 1.25, "co2_score": 1.25, "suitability_score": 1, "final_score": 0.0625},
                {"rank": 2, "cost_rupees": 1.0, "co2_score": 1.0, "suitability_score": 1, "final_score": 0.5}
            ]}"#,
        ));
        let results = view.results().expect("results");
        assert_eq!(results.summary.cost_text(), "₹ 1.13");
        assert_eq!(results.summary.co2_text(), "1.13");
        assert_eq!(results.rows[0].cells.final_score, "0.063");
    }
}
