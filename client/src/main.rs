mod api;
mod chart;
mod config;
mod dashboard;
mod dom;
mod ranking;
mod results;

use std::rc::Rc;

fn main() {
    console_error_panic_hook::set_once();
    if dom::document().is_none() {
        return;
    }

    let config = Rc::new(config::load());
    dashboard::load(config.clone());
    dashboard::load_metrics(config.clone());
    ranking::bind(config);
}
