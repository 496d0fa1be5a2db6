//! Observability: planner counters and the sink abstraction.
//!
//! Planning logic records `MetricsEvent`s through `sink::record`; it never
//! touches the counter state directly. Structured log lines go through
//! `tracing` at the call sites.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::PlanCounters;
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
