use crate::expr::ColumnId;
use std::{cmp::Ordering, collections::BTreeMap};

/// Partial order over two bound-column maps (see
/// `AccessPath::bound_column_lengths`).
///
/// `Greater` means `left` binds every column `right` binds, each with at
/// least as long a stored value, and more. `None` means neither dominates.
/// A full-length binding (`None` length) outranks any prefix.
#[must_use]
pub fn compare_column_coverage(
    left: &BTreeMap<ColumnId, Option<u32>>,
    right: &BTreeMap<ColumnId, Option<u32>>,
) -> Option<Ordering> {
    let mut left_better = false;
    let mut right_better = false;

    for (column, left_len) in left {
        match right.get(column) {
            None => left_better = true,
            Some(right_len) => match length_rank(*left_len).cmp(&length_rank(*right_len)) {
                Ordering::Greater => left_better = true,
                Ordering::Less => right_better = true,
                Ordering::Equal => {}
            },
        }
    }
    if right.keys().any(|column| !left.contains_key(column)) {
        right_better = true;
    }

    match (left_better, right_better) {
        (true, true) => None,
        (true, false) => Some(Ordering::Greater),
        (false, true) => Some(Ordering::Less),
        (false, false) => Some(Ordering::Equal),
    }
}

fn length_rank(length: Option<u32>) -> u64 {
    match length {
        Some(length) => u64::from(length),
        None => u64::MAX,
    }
}

///
/// TESTS
///
