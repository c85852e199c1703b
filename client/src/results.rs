use ecopack_shared::{HighlightCard, RESULT_COLUMNS, RankingView, ResultRow};
use leptos::prelude::*;

const TOP_ROW_STYLE: &str = "background:#E8F5E9;font-weight:600;";

/// Rows of the results table body. Re-rendered wholesale from the current view.
#[component]
pub fn ResultRows(state: RwSignal<RankingView>) -> impl IntoView {
    move || {
        state.with(|current| {
            if let Some(message) = current.message() {
                return view! {
                    <tr>
                        <td colspan={RESULT_COLUMNS.to_string()} class="text-center text-danger">
                            {message}
                        </td>
                    </tr>
                }
                .into_any();
            }
            match current.results() {
                Some(results) => results
                    .rows
                    .iter()
                    .map(result_row)
                    .collect_view()
                    .into_any(),
                None => ().into_any(),
            }
        })
    }
}

fn result_row(row: &ResultRow) -> impl IntoView + use<> {
    let style = if row.emphasized { TOP_ROW_STYLE } else { "" };
    let cells = row.cells.clone();
    view! {
        <tr style=style>
            <td>{cells.rank}</td>
            <td>{cells.material_name}</td>
            <td>{cells.cost}</td>
            <td>{cells.co2}</td>
            <td>{cells.suitability}</td>
            <td>{cells.final_score}</td>
        </tr>
    }
}

/// Top-3 highlight cards.
#[component]
pub fn HighlightCards(state: RwSignal<RankingView>) -> impl IntoView {
    move || {
        state.with(|current| match current.results() {
            Some(results) => results
                .cards
                .iter()
                .map(highlight_card)
                .collect_view()
                .into_any(),
            None => ().into_any(),
        })
    }
}

fn highlight_card(card: &HighlightCard) -> impl IntoView + use<> {
    let class = format!("material-card {}", card.border_class());
    let style = format!("animation-delay:{}s", card.animation_delay_secs);
    let rank_label = card.rank_label();
    let cells = card.cells.clone();
    view! {
        <div class="col-md-4 mb-4">
            <div class=class style=style>
                <div class="material-rank">{rank_label}</div>
                <div class="material-title mt-2">{cells.material_name}</div>
                <div class="mt-3">
                    "💰 Cost: " {cells.cost} <br />
                    "🌍 CO₂ Score: " {cells.co2} <br />
                    "📦 Suitability: " {cells.suitability} <br />
                    "⭐ Final Score: " {cells.final_score}
                </div>
            </div>
        </div>
    }
}
