use super::*;
use crate::{
    model::{FamilyCollations, IndexColumn},
    obs::{MetricsEvent, MetricsSink, with_metrics_sink},
    plan::{CorrelatedSplit, split_correlated_access_conditions},
};
use std::cell::RefCell;

fn split(
    columns: &[IndexColumn],
    filters: &[Expression],
    eq_or_in_count: usize,
) -> CorrelatedSplit {
    split_correlated_access_conditions(&FamilyCollations, columns, filters, eq_or_in_count)
}

#[test]
fn binds_constant_and_correlated_equalities_after_prefix() {
    let filters = vec![eq("b", outer()), eq("c", int(5))];

    let out = split(&full(&["a", "b", "c"]), &filters, 1);

    assert_eq!(out.access, filters);
    assert!(out.remained.is_empty());
    assert_eq!(out.filters_consumed, 2);
}

#[test]
fn access_follows_index_order_not_filter_order() {
    let filters = vec![eq("c", int(5)), eq("b", outer())];

    let out = split(&full(&["a", "b", "c"]), &filters, 1);

    assert_eq!(out.access, vec![eq("b", outer()), eq("c", int(5))]);
    assert!(out.remained.is_empty());
}

#[test]
fn prefix_column_match_keeps_filter_as_residual() {
    let columns = vec![IndexColumn::full(col("a")), IndexColumn::prefix(col("b"), 10)];
    let filters = vec![eq("b", int(5))];

    let out = split(&columns, &filters, 1);

    assert_eq!(out.access, vec![eq("b", int(5))]);
    assert_eq!(out.remained, vec![eq("b", int(5))]);
    assert_eq!(out.prefix_matches, 1);
    assert_eq!(out.filters_consumed, 0);
}

#[test]
fn gap_in_index_columns_stops_binding() {
    let filters = vec![eq("c", int(5))];

    let out = split(&full(&["a", "b", "c"]), &filters, 1);

    assert!(out.access.is_empty());
    assert_eq!(out.remained, filters);
}

#[test]
fn gap_keeps_columns_bound_before_it() {
    let filters = vec![eq("d", int(4)), eq("b", int(2))];

    let out = split(&full(&["a", "b", "c", "d"]), &filters, 1);

    assert_eq!(out.access, vec![eq("b", int(2))]);
    assert_eq!(out.remained, vec![eq("d", int(4))]);
}

#[test]
fn incompatible_collation_never_binds() {
    let columns = full(&["a", "s"]);
    let filters = vec![eq_ci("s", "x")];

    let out = split(&columns, &filters, 1);

    assert!(out.access.is_empty());
    assert_eq!(out.remained, filters);
    assert_eq!(out.collation_rejections, 1);
}

#[test]
fn first_matching_filter_wins_and_later_duplicate_remains() {
    let filters = vec![eq("b", int(1)), eq("b", outer())];

    let out = split(&full(&["a", "b"]), &filters, 1);

    assert_eq!(out.access, vec![eq("b", int(1))]);
    assert_eq!(out.remained, vec![eq("b", outer())]);
}

#[test]
fn non_equality_filters_only_remain() {
    let filters = vec![gt("b", 3), eq("b", int(7)), gt("c", 1)];

    let out = split(&full(&["a", "b", "c"]), &filters, 1);

    assert_eq!(out.access, vec![eq("b", int(7))]);
    assert_eq!(out.remained, vec![gt("b", 3), gt("c", 1)]);
}

#[test]
fn saturated_prefix_returns_filters_unchanged() {
    let filters = vec![eq("a", int(1)), gt("b", 2)];

    let out = split(&full(&["a", "b"]), &filters, 2);

    assert!(out.access.is_empty());
    assert_eq!(out.remained, filters);
}

#[test]
fn empty_filters_bind_nothing() {
    let out = split(&full(&["a", "b"]), &[], 0);

    assert!(out.access.is_empty());
    assert!(out.remained.is_empty());
}

#[test]
fn zero_prefix_binds_from_first_column() {
    let filters = vec![eq("b", int(2)), eq("a", outer())];

    let out = split(&full(&["a", "b"]), &filters, 0);

    assert_eq!(out.access, vec![eq("a", outer()), eq("b", int(2))]);
    assert!(out.remained.is_empty());
}

#[test]
fn source_filters_are_not_mutated() {
    let filters = vec![eq("b", int(2))];
    let before = filters.clone();

    let _ = split(&full(&["a", "b"]), &filters, 1);

    assert_eq!(filters, before);
}

#[test]
fn split_reports_counters_to_sink() {
    #[derive(Default)]
    struct Capture(RefCell<Vec<MetricsEvent>>);

    impl MetricsSink for Capture {
        fn record(&self, event: MetricsEvent) {
            self.0.borrow_mut().push(event);
        }
    }

    let capture = Capture::default();
    let columns = vec![
        IndexColumn::full(col("a")),
        IndexColumn::prefix(col("b"), 4),
        IndexColumn::full(col("c")),
    ];
    let filters = vec![eq("c", int(3)), eq("b", int(2))];

    with_metrics_sink(&capture, || split(&columns, &filters, 1));

    assert_eq!(
        *capture.0.borrow(),
        vec![MetricsEvent::Split {
            columns_bound: 2,
            filters_consumed: 1,
            prefix_matches: 1,
            collation_rejections: 0,
        }]
    );
}
