pub mod chart;
pub mod coerce;
pub mod colors;
pub mod config;
pub mod error;
pub mod metrics;
pub mod ranking;
pub mod sequence;
pub mod trends;

pub use chart::{ChartConfig, ChartKind, ChartSpec, dashboard_charts};
pub use colors::{Rgb, Theme};
pub use config::PageConfig;
pub use error::FetchError;
pub use metrics::DashboardMetrics;
pub use ranking::*;
pub use sequence::{RequestSequence, Ticket};
pub use trends::*;
