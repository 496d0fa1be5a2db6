//! Access-path planning: binding filters to index columns and carrying the
//! per-candidate result forward to path selection.
//!
//! Determinism: filters are always scanned in their original order and the
//! first match wins, so the same inputs always bind the same conditions.

mod candidate;
mod coverage;
mod error;
mod matcher;
mod path;
mod split;
mod stage;

#[cfg(test)]
mod tests;

// re-exports
pub use candidate::CandidateSet;
pub use coverage::compare_column_coverage;
pub use error::PathError;
pub use matcher::is_column_eq_correlated_or_constant;
pub use path::{AccessPath, PathKind, SelectivityCounts, StoreKind};
pub use split::{CorrelatedSplit, split_correlated_access_conditions};
pub use stage::PathStage;
