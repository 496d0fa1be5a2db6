//! Correlated/constant access-condition extraction.
//!
//! Walks index key columns past an already-bound equality prefix and binds
//! each one to the first unused `column = constant | correlated` filter.
//! The walk stops at the first column with no match: a multi-column seek
//! needs an unbroken bound prefix.

use crate::{
    expr::Expression,
    model::{CollationOracle, IndexColumn},
    obs::sink::{self, MetricsEvent},
    plan::matcher::{EqualityMatch, match_equality},
};
use tracing::{debug, trace};

///
/// CorrelatedSplit
///
/// Output of one split. `access` is positionally aligned with the index
/// columns starting at the equality prefix; `remained` keeps every filter
/// not consumed by a full-length column match, in original order.
///

#[derive(Clone, Debug, PartialEq)]
pub struct CorrelatedSplit {
    pub access: Vec<Expression>,
    pub remained: Vec<Expression>,
    pub filters_consumed: usize,
    pub prefix_matches: usize,
    pub collation_rejections: usize,
}

impl CorrelatedSplit {
    #[must_use]
    pub fn into_parts(self) -> (Vec<Expression>, Vec<Expression>) {
        (self.access, self.remained)
    }
}

/// Split `filters` into seek conditions for `index_columns[eq_or_in_count..]`
/// and residual filters.
///
/// Total over well-formed input. A prefix-length key column binds its
/// filter without consuming it, so that filter also lands in `remained`
/// and may bind again at a later column.
#[must_use]
pub fn split_correlated_access_conditions(
    oracle: &dyn CollationOracle,
    index_columns: &[IndexColumn],
    filters: &[Expression],
    eq_or_in_count: usize,
) -> CorrelatedSplit {
    debug_assert!(
        eq_or_in_count <= index_columns.len(),
        "equality prefix {eq_or_in_count} exceeds {} index columns",
        index_columns.len()
    );

    let mut access = Vec::with_capacity(index_columns.len().saturating_sub(eq_or_in_count));
    let mut used = vec![false; filters.len()];
    let mut prefix_matches = 0;
    let mut collation_rejections = 0;

    for (slot, key) in index_columns.iter().enumerate().skip(eq_or_in_count) {
        let mut found = None;
        for (pos, filter) in filters.iter().enumerate() {
            if used[pos] {
                continue;
            }
            match match_equality(oracle, filter, &key.column) {
                EqualityMatch::Matched => {
                    found = Some(pos);
                    break;
                }
                EqualityMatch::CollationMismatch => collation_rejections += 1,
                EqualityMatch::NoMatch => {}
            }
        }

        // A gap makes every later column useless for the seek.
        let Some(pos) = found else {
            trace!(slot, column = %key.column.name, "no seekable equality; stopping");
            break;
        };

        let filter = &filters[pos];
        trace!(slot, column = %key.column.name, %filter, "bound index column");
        access.push(filter.clone());
        if key.is_full_length() {
            used[pos] = true;
        } else {
            prefix_matches += 1;
        }
    }

    let remained: Vec<Expression> = filters
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|(filter, _)| filter.clone())
        .collect();
    let filters_consumed = filters.len() - remained.len();

    debug!(
        eq_or_in_count,
        bound = access.len(),
        consumed = filters_consumed,
        prefix_matches,
        remained = remained.len(),
        "split correlated access conditions"
    );
    sink::record(MetricsEvent::Split {
        columns_bound: access.len() as u64,
        filters_consumed: filters_consumed as u64,
        prefix_matches: prefix_matches as u64,
        collation_rejections: collation_rejections as u64,
    });

    CorrelatedSplit {
        access,
        remained,
        filters_consumed,
        prefix_matches,
        collation_rejections,
    }
}
