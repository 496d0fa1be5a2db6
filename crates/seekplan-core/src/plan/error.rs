use crate::plan::PathStage;
use thiserror::Error as ThisError;

///
/// PathError
///
/// Contract failures of the access-path record. Each one means an earlier
/// planning stage handed over inconsistent state.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathError {
    #[error("invalid access path transition: {from} -> {to}")]
    InvalidTransition { from: PathStage, to: PathStage },

    #[error("{operation} requires a single-index access path")]
    NotAnIndexPath { operation: &'static str },

    #[error("equality prefix of {eq_or_in_count} exceeds {index_columns} index columns")]
    EqualityPrefixOutOfRange {
        eq_or_in_count: usize,
        index_columns: usize,
    },

    #[error("equality count {eq_count} exceeds equality-or-in count {eq_or_in_count}")]
    EqualityCountExceedsPrefix {
        eq_count: usize,
        eq_or_in_count: usize,
    },

    #[error("{conditions} access conditions do not match an equality prefix of {expected}")]
    AccessPrefixMismatch { conditions: usize, expected: usize },

    #[error("row count estimate {value} is not a finite non-negative number")]
    InvalidRowCount { value: String },

    #[error("selectivity grows: access {after_access}, index {after_index}, table {after_table}")]
    NonMonotonicSelectivity {
        after_access: String,
        after_index: String,
        after_table: String,
    },

    #[error("index merge requires at least one partial path")]
    EmptyIndexMerge,

    #[error("index merge partial paths must be single-index paths")]
    NestedIndexMerge,

    #[error("index merge residual filter {filter} is duplicated into a partial path")]
    DuplicatedMergeFilter { filter: String },

    #[error("index merge is disabled by planner config")]
    IndexMergeDisabled,

    #[error("candidate {position} is out of range for {len} candidates")]
    CandidateOutOfRange { position: usize, len: usize },

    #[error("candidate {position} is not forced while forced candidates exist")]
    ForcedCandidateSkipped { position: usize },

    #[error("a candidate has already been selected for this table")]
    AlreadySelected,
}
