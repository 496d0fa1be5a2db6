use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// PlanCounters
/// Ephemeral, per-thread counters for access-path planning.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlanCounters {
    // Correlated/constant splitting
    pub splits: u64,
    pub columns_bound: u64,
    pub filters_consumed: u64,
    pub prefix_matches: u64,
    pub collation_rejections: u64,

    // Candidate selection
    pub paths_selected: u64,
    pub paths_discarded: u64,
    pub index_merges: u64,
}

thread_local! {
    static PLAN_COUNTERS: RefCell<PlanCounters> = RefCell::new(PlanCounters::default());
}

/// Borrow counters immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&PlanCounters) -> R) -> R {
    PLAN_COUNTERS.with(|m| f(&m.borrow()))
}

/// Borrow counters mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut PlanCounters) -> R) -> R {
    PLAN_COUNTERS.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset() {
    with_state_mut(|m| *m = PlanCounters::default());
}

/// Snapshot the current counters.
pub(crate) fn report() -> PlanCounters {
    with_state(Clone::clone)
}
