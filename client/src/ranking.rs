use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use ecopack_shared::{
    FetchError, KpiSummary, PageConfig, RankingRequest, RankingResponse, RankingView,
    RequestSequence, Ticket,
};
use gloo_timers::callback::Timeout;
use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlButtonElement, HtmlElement, HtmlFormElement};

use crate::results::{HighlightCards, ResultRows};
use crate::{api, dom};

const SUMMARY_FADE_DELAY_MS: u32 = 100;

struct SubmitBinding {
    form: HtmlFormElement,
    handler: Closure<dyn Fn(web_sys::Event)>,
}

thread_local! {
    static SUBMIT_BINDING: RefCell<Option<SubmitBinding>> = const { RefCell::new(None) };
    static RESULT_MOUNTS: RefCell<Vec<Box<dyn Any>>> = const { RefCell::new(Vec::new()) };
}

/// Text to put back on the submit control once a submission settles.
fn idle_label(current: String, fallback: &str) -> String {
    if current.trim().is_empty() {
        fallback.to_owned()
    } else {
        current
    }
}

/// View to render when a request settles, `None` when a newer submission
/// owns the regions or this one already rendered.
fn settle(
    sequence: &mut RequestSequence,
    ticket: Ticket,
    outcome: Result<RankingResponse, FetchError>,
) -> Option<RankingView> {
    sequence
        .settle(ticket)
        .then(|| RankingView::from_outcome(outcome))
}

/// The submit button plus the labels it toggles between.
struct SubmitControl {
    button: HtmlButtonElement,
    idle_html: String,
    busy_label: String,
}

impl SubmitControl {
    fn new(button: HtmlButtonElement, config: &PageConfig) -> Self {
        let idle_html = idle_label(button.inner_html(), &config.labels.submit_idle);
        Self {
            button,
            idle_html,
            busy_label: config.labels.submit_busy.clone(),
        }
    }

    fn set_busy(&self) {
        self.button.set_text_content(Some(&self.busy_label));
        self.button.set_disabled(true);
    }

    fn restore(&self) {
        self.button.set_inner_html(&self.idle_html);
        self.button.set_disabled(false);
    }
}

/// Page elements outside the Leptos-mounted lists.
struct Regions {
    summary: HtmlElement,
    kpi_cost: String,
    kpi_co2: String,
    kpi_suitability: String,
    top_section: Option<HtmlElement>,
}

impl Regions {
    fn show_summary(&self, summary: Option<KpiSummary>) {
        let Some(summary) = summary else {
            dom::set_style(&self.summary, "display", "none");
            return;
        };

        dom::set_text(&self.kpi_cost, &summary.cost_text());
        dom::set_text(&self.kpi_co2, &summary.co2_text());
        dom::set_text(&self.kpi_suitability, &summary.suitability_text());

        dom::set_style(&self.summary, "display", "flex");
        dom::set_style(&self.summary, "opacity", "0");
        let el = self.summary.clone();
        Timeout::new(SUMMARY_FADE_DELAY_MS, move || {
            dom::set_style(&el, "transition", "opacity 0.6s ease");
            dom::set_style(&el, "opacity", "1");
        })
        .forget();
    }

    fn show_top_section(&self, visible: bool) {
        if let Some(section) = &self.top_section {
            dom::set_style(section, "display", if visible { "block" } else { "none" });
        }
    }
}

#[derive(Clone)]
struct Controller {
    config: Rc<PageConfig>,
    form: HtmlFormElement,
    regions: Rc<Regions>,
    submit: Option<Rc<SubmitControl>>,
    state: RwSignal<RankingView>,
    sequence: Rc<RefCell<RequestSequence>>,
}

impl Controller {
    fn collect_request(&self) -> RankingRequest {
        let data = web_sys::FormData::new_with_form(&self.form).ok();
        RankingRequest::from_fields(|name| data.as_ref()?.get(name).as_string())
    }

    /// Replace everything the controller renders with `next`.
    fn show(&self, next: RankingView) {
        let summary = next.results().map(|results| results.summary);
        let has_cards = next
            .results()
            .is_some_and(|results| !results.cards.is_empty());
        self.state.set(next);
        self.regions.show_summary(summary);
        self.regions.show_top_section(has_cards);
    }

    fn submit(&self) {
        let ticket = self.sequence.borrow_mut().issue();
        if let Some(submit) = &self.submit {
            submit.set_busy();
        }

        let request = self.collect_request();
        self.show(RankingView::Cleared);

        let this = self.clone();
        spawn_local(async move {
            let outcome = api::post_ranking(&this.config.api.ranking, &request).await;
            if let Err(e) = &outcome {
                dom::error(&format!("Recommendation API error: {e}"));
            }

            let Some(next) = settle(&mut this.sequence.borrow_mut(), ticket, outcome) else {
                return;
            };
            this.show(next);
            if let Some(submit) = &this.submit {
                submit.restore();
            }
        });
    }
}

/// Keep a Leptos mount alive for the lifetime of the page.
fn keep_mounted<T: 'static>(handle: T) {
    RESULT_MOUNTS.with(|mounts| mounts.borrow_mut().push(Box::new(handle)));
}

/// Attach the ranking controller to the page's recommendation form.
pub fn bind(config: Rc<PageConfig>) {
    let mounts = &config.form;
    let Some(form) = dom::by_id::<HtmlFormElement>(&mounts.form) else {
        return;
    };
    let Some(table_body) = dom::query::<HtmlElement>(&mounts.results_body) else {
        dom::error("Results table body not found, recommendation form left unbound.");
        return;
    };
    let Some(summary) = dom::by_id::<HtmlElement>(&mounts.summary) else {
        dom::error("Prediction summary not found, recommendation form left unbound.");
        return;
    };
    let top_container = dom::by_id::<HtmlElement>(&mounts.top_container);
    let top_section = dom::by_id::<HtmlElement>(&mounts.top_section);
    let submit = dom::by_id::<HtmlButtonElement>(&mounts.submit_button)
        .map(|button| Rc::new(SubmitControl::new(button, &config)));
    if submit.is_none() {
        dom::warn(&format!("Submit control '{}' not found.", mounts.submit_button));
    }

    // Server-rendered placeholder markup is dropped before mounting.
    let state = RwSignal::new(RankingView::Cleared);
    table_body.set_inner_html("");
    keep_mounted(mount_to(table_body, move || view! { <ResultRows state=state /> }));
    if let Some(container) = top_container {
        container.set_inner_html("");
        keep_mounted(mount_to(container, move || view! { <HighlightCards state=state /> }));
    }

    let controller = Controller {
        regions: Rc::new(Regions {
            summary,
            kpi_cost: mounts.kpi_cost.clone(),
            kpi_co2: mounts.kpi_co2.clone(),
            kpi_suitability: mounts.kpi_suitability.clone(),
            top_section,
        }),
        form: form.clone(),
        submit,
        state,
        sequence: Rc::new(RefCell::new(RequestSequence::default())),
        config: config.clone(),
    };
    controller.show(RankingView::Cleared);

    SUBMIT_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            let _ = old
                .form
                .remove_event_listener_with_callback("submit", old.handler.as_ref().unchecked_ref());
        }
    });

    let handler = Closure::<dyn Fn(web_sys::Event)>::new(move |e: web_sys::Event| {
        e.prevent_default();
        controller.submit();
    });
    if form
        .add_event_listener_with_callback("submit", handler.as_ref().unchecked_ref())
        .is_ok()
    {
        SUBMIT_BINDING.with(|slot| {
            *slot.borrow_mut() = Some(SubmitBinding { form, handler });
        });
    }
}
