pub mod holidays;
pub mod revenue;
pub mod transitions;

pub use holidays::detect_holidays;
pub use revenue::{
    AccountingIndex, compute_daily_metrics, compute_daily_metrics_indexed,
    compute_period_metrics,
};
pub use transitions::build_transitions;
