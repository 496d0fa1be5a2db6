//! Metrics sink boundary.
//!
//! Planning logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics::{self, PlanCounters};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Split {
        columns_bound: u64,
        filters_consumed: u64,
        prefix_matches: u64,
        collation_rejections: u64,
    },
    IndexMerge {
        branches: u64,
    },
    Selection {
        discarded: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Split {
                columns_bound,
                filters_consumed,
                prefix_matches,
                collation_rejections,
            } => metrics::with_state_mut(|m| {
                m.splits = m.splits.saturating_add(1);
                m.columns_bound = m.columns_bound.saturating_add(columns_bound);
                m.filters_consumed = m.filters_consumed.saturating_add(filters_consumed);
                m.prefix_matches = m.prefix_matches.saturating_add(prefix_matches);
                m.collation_rejections = m
                    .collation_rejections
                    .saturating_add(collation_rejections);
            }),
            MetricsEvent::IndexMerge { branches: _ } => metrics::with_state_mut(|m| {
                m.index_merges = m.index_merges.saturating_add(1);
            }),
            MetricsEvent::Selection { discarded } => metrics::with_state_mut(|m| {
                m.paths_selected = m.paths_selected.saturating_add(1);
                m.paths_discarded = m.paths_discarded.saturating_add(discarded);
            }),
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a live `&dyn MetricsSink` in `with_metrics_sink`,
        //   which restores the previous slot on every exit including unwind.
        // - `record` dereferences synchronously and never stores `ptr`.
        // - Only a shared reference is materialized, matching the original borrow.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's planner counters.
#[must_use]
pub fn metrics_report() -> PlanCounters {
    metrics::report()
}

/// Reset the current thread's planner counters.
pub fn metrics_reset_all() {
    metrics::reset();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - The erased pointer is installed only for this dynamic scope; `Guard`
    //   restores the previous slot on every exit, including panic.
    // - `record` only dereferences synchronously, so the borrow of `sink`
    //   outlives every use of the pointer.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct CaptureSink {
        events: RefCell<Vec<MetricsEvent>>,
    }

    impl MetricsSink for CaptureSink {
        fn record(&self, event: MetricsEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn global_sink_accumulates_split_counters() {
        metrics_reset_all();

        record(MetricsEvent::Split {
            columns_bound: 2,
            filters_consumed: 1,
            prefix_matches: 1,
            collation_rejections: 0,
        });
        record(MetricsEvent::Selection { discarded: 3 });

        let report = metrics_report();
        assert_eq!(report.splits, 1);
        assert_eq!(report.columns_bound, 2);
        assert_eq!(report.filters_consumed, 1);
        assert_eq!(report.prefix_matches, 1);
        assert_eq!(report.paths_selected, 1);
        assert_eq!(report.paths_discarded, 3);
    }

    #[test]
    fn override_captures_events_and_restores_global_sink() {
        metrics_reset_all();
        let sink = CaptureSink::default();

        with_metrics_sink(&sink, || {
            record(MetricsEvent::IndexMerge { branches: 2 });
        });
        record(MetricsEvent::IndexMerge { branches: 3 });

        assert_eq!(
            *sink.events.borrow(),
            vec![MetricsEvent::IndexMerge { branches: 2 }]
        );
        assert_eq!(metrics_report().index_merges, 1);
    }
}
