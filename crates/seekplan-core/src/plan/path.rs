use crate::{
    config::{PlanContext, PlannerConfig},
    expr::{Column, ColumnId, Expression},
    model::{IndexColumn, IndexInfo},
    obs::sink::{self, MetricsEvent},
    plan::{PathError, PathStage, split::split_correlated_access_conditions},
};
use std::{collections::BTreeMap, fmt};
use tracing::{debug, warn};

///
/// StoreKind
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StoreKind {
    #[default]
    Row,
    Columnar,
}

///
/// SelectivityCounts
///
/// Estimated row counts after each filtering stage, produced by the
/// range/statistics stage. Counts never grow from one stage to the next.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectivityCounts {
    pub after_access: f64,
    pub after_index: f64,
    pub after_table: Option<f64>,
}

impl SelectivityCounts {
    #[must_use]
    pub const fn new(after_access: f64, after_index: f64) -> Self {
        Self {
            after_access,
            after_index,
            after_table: None,
        }
    }

    #[must_use]
    pub const fn with_final_rows(mut self, rows: f64) -> Self {
        self.after_table = Some(rows);
        self
    }

    /// Check every count is a finite non-negative number and, when
    /// `monotonic` is set, that counts never grow across stages.
    pub fn validate(&self, monotonic: bool) -> Result<(), PathError> {
        for value in [Some(self.after_access), Some(self.after_index), self.after_table]
            .into_iter()
            .flatten()
        {
            if !value.is_finite() || value < 0.0 {
                return Err(PathError::InvalidRowCount {
                    value: value.to_string(),
                });
            }
        }

        if !monotonic {
            return Ok(());
        }

        let final_ok = self
            .after_table
            .is_none_or(|rows| rows <= self.after_index);
        if self.after_index > self.after_access || !final_ok {
            return Err(PathError::NonMonotonicSelectivity {
                after_access: self.after_access.to_string(),
                after_index: self.after_index.to_string(),
                after_table: self
                    .after_table
                    .map_or_else(|| "unknown".to_string(), |rows| rows.to_string()),
            });
        }

        Ok(())
    }
}

///
/// PathKind
///
/// Mode of an access path. Mode-specific state lives only in its variant:
/// a primary-key column exists only for table scans, partial paths only
/// for index merges.
///

#[derive(Clone, Debug, PartialEq)]
pub enum PathKind {
    Table {
        primary_key_column: Option<Column>,
    },
    Index(IndexInfo),
    IndexMerge {
        partial_paths: Vec<AccessPath>,
        is_dnf_condition: bool,
    },
}

///
/// AccessPath
///
/// Per-candidate planning state for one way of reading a table.
/// Created when path generation starts, mutated in place through each
/// stage, and discarded unless it wins selection.
///
/// Invariants:
/// - `access_conditions` aligns 1:1 with a prefix of the index columns.
/// - `equality_count <= equality_or_in_count <= access_conditions.len()`.
/// - residual filters of an index merge live on the parent only.
///

#[derive(Clone, Debug, PartialEq)]
pub struct AccessPath {
    kind: PathKind,
    stage: PathStage,
    access_conditions: Vec<Expression>,
    equality_count: usize,
    equality_or_in_count: usize,
    index_filters: Vec<Expression>,
    table_filters: Vec<Expression>,
    counts: Option<SelectivityCounts>,
    store_kind: StoreKind,
    remote_analytic_read: bool,
    forced: bool,
}

impl AccessPath {
    fn with_kind(kind: PathKind, table_filters: Vec<Expression>) -> Self {
        Self {
            kind,
            stage: PathStage::Created,
            access_conditions: Vec::new(),
            equality_count: 0,
            equality_or_in_count: 0,
            index_filters: Vec::new(),
            table_filters,
            counts: None,
            store_kind: StoreKind::Row,
            remote_analytic_read: false,
            forced: false,
        }
    }

    /// Full table scan, optionally ordered by an implicit primary-key column.
    #[must_use]
    pub fn table(primary_key_column: Option<Column>, table_filters: Vec<Expression>) -> Self {
        Self::with_kind(PathKind::Table { primary_key_column }, table_filters)
    }

    /// Single-index access. Every filter starts as a table filter.
    #[must_use]
    pub fn index(index: IndexInfo, table_filters: Vec<Expression>) -> Self {
        Self::with_kind(PathKind::Index(index), table_filters)
    }

    /// Union of single-index accesses. Filters no branch absorbs belong to
    /// `table_filters` of the merged path, never to a branch.
    pub fn index_merge(
        partial_paths: Vec<Self>,
        is_dnf_condition: bool,
        table_filters: Vec<Expression>,
        config: &PlannerConfig,
    ) -> Result<Self, PathError> {
        if !config.index_merge {
            return Err(PathError::IndexMergeDisabled);
        }
        if partial_paths.is_empty() {
            return Err(PathError::EmptyIndexMerge);
        }
        if partial_paths.iter().any(Self::is_index_merge) {
            return Err(PathError::NestedIndexMerge);
        }
        if let Some(filter) = table_filters.iter().find(|&filter| {
            partial_paths
                .iter()
                .any(|partial| partial.table_filters.contains(filter))
        }) {
            return Err(PathError::DuplicatedMergeFilter {
                filter: filter.to_string(),
            });
        }

        sink::record(MetricsEvent::IndexMerge {
            branches: partial_paths.len() as u64,
        });

        Ok(Self::with_kind(
            PathKind::IndexMerge {
                partial_paths,
                is_dnf_condition,
            },
            table_filters,
        ))
    }

    #[must_use]
    pub const fn with_store_kind(mut self, store_kind: StoreKind) -> Self {
        self.store_kind = store_kind;
        self
    }

    /// Mark this path as named by a user hint; forced paths bypass cost.
    #[must_use]
    pub const fn with_forced(mut self, forced: bool) -> Self {
        self.forced = forced;
        self
    }

    #[must_use]
    pub const fn with_remote_analytic_read(mut self, remote: bool) -> Self {
        self.remote_analytic_read = remote;
        self
    }

    #[must_use]
    pub const fn kind(&self) -> &PathKind {
        &self.kind
    }

    #[must_use]
    pub const fn stage(&self) -> PathStage {
        self.stage
    }

    #[must_use]
    pub const fn index_info(&self) -> Option<&IndexInfo> {
        match &self.kind {
            PathKind::Index(index) => Some(index),
            PathKind::Table { .. } | PathKind::IndexMerge { .. } => None,
        }
    }

    /// Key columns of the chosen index; empty for table scans and merges.
    #[must_use]
    pub fn index_columns(&self) -> &[IndexColumn] {
        match self.index_info() {
            Some(index) => index.columns.as_slice(),
            None => &[],
        }
    }

    #[must_use]
    pub fn access_conditions(&self) -> &[Expression] {
        &self.access_conditions
    }

    #[must_use]
    pub const fn equality_count(&self) -> usize {
        self.equality_count
    }

    #[must_use]
    pub const fn equality_or_in_count(&self) -> usize {
        self.equality_or_in_count
    }

    #[must_use]
    pub fn index_filters(&self) -> &[Expression] {
        &self.index_filters
    }

    #[must_use]
    pub fn table_filters(&self) -> &[Expression] {
        &self.table_filters
    }

    #[must_use]
    pub const fn counts(&self) -> Option<SelectivityCounts> {
        self.counts
    }

    #[must_use]
    pub fn count_after_access(&self) -> Option<f64> {
        self.counts.map(|counts| counts.after_access)
    }

    #[must_use]
    pub fn count_after_index(&self) -> Option<f64> {
        self.counts.map(|counts| counts.after_index)
    }

    #[must_use]
    pub fn partial_paths(&self) -> &[Self] {
        match &self.kind {
            PathKind::IndexMerge { partial_paths, .. } => partial_paths.as_slice(),
            PathKind::Table { .. } | PathKind::Index(_) => &[],
        }
    }

    #[must_use]
    pub const fn is_dnf_condition(&self) -> bool {
        matches!(
            self.kind,
            PathKind::IndexMerge {
                is_dnf_condition: true,
                ..
            }
        )
    }

    #[must_use]
    pub const fn primary_key_column(&self) -> Option<&Column> {
        match &self.kind {
            PathKind::Table { primary_key_column } => primary_key_column.as_ref(),
            PathKind::Index(_) | PathKind::IndexMerge { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_table_path(&self) -> bool {
        matches!(self.kind, PathKind::Table { .. })
    }

    #[must_use]
    pub const fn is_index_merge(&self) -> bool {
        matches!(self.kind, PathKind::IndexMerge { .. })
    }

    /// Whether the cost comparator may rank this path: ranges are built and
    /// the recorded counts never grow across stages, whatever the config.
    #[must_use]
    pub fn is_comparable(&self) -> bool {
        self.stage == PathStage::RangesBuilt
            && self
                .counts
                .is_some_and(|counts| counts.validate(true).is_ok())
    }

    #[must_use]
    pub const fn is_forced(&self) -> bool {
        self.forced
    }

    #[must_use]
    pub const fn store_kind(&self) -> StoreKind {
        self.store_kind
    }

    #[must_use]
    pub const fn is_remote_analytic_read(&self) -> bool {
        self.remote_analytic_read
    }

    /// Store the equality/IN prefix extracted by the range builder.
    ///
    /// `access_conditions` may extend one range condition past the
    /// equality prefix but never past the index.
    pub fn record_equality_prefix(
        &mut self,
        eq_count: usize,
        eq_or_in_count: usize,
        access_conditions: Vec<Expression>,
    ) -> Result<(), PathError> {
        let index_columns = self.require_index("equality extraction")?.columns.len();

        if eq_or_in_count > index_columns {
            return Err(PathError::EqualityPrefixOutOfRange {
                eq_or_in_count,
                index_columns,
            });
        }
        if eq_count > eq_or_in_count {
            return Err(PathError::EqualityCountExceedsPrefix {
                eq_count,
                eq_or_in_count,
            });
        }
        if access_conditions.len() < eq_or_in_count || access_conditions.len() > index_columns {
            return Err(PathError::AccessPrefixMismatch {
                conditions: access_conditions.len(),
                expected: eq_or_in_count,
            });
        }

        self.advance(PathStage::EqualityExtracted)?;
        self.equality_count = eq_count;
        self.equality_or_in_count = eq_or_in_count;
        self.access_conditions = access_conditions;

        Ok(())
    }

    /// Extend the access prefix with `column = constant | correlated`
    /// filters taken from `table_filters`, and replace `table_filters` with
    /// the residue. Returns the number of newly bound columns.
    ///
    /// Skipped when a range condition already binds the column after the
    /// equality prefix.
    pub fn split_correlated(&mut self, ctx: &PlanContext<'_>) -> Result<usize, PathError> {
        let index = self.require_index("correlated split")?;
        let eq_or_in_count = self.equality_or_in_count;
        if eq_or_in_count > index.columns.len() {
            return Err(PathError::EqualityPrefixOutOfRange {
                eq_or_in_count,
                index_columns: index.columns.len(),
            });
        }
        self.stage.advance(PathStage::CorrelatedSplit)?;

        if self.access_conditions.len() != eq_or_in_count {
            self.advance(PathStage::CorrelatedSplit)?;
            return Ok(0);
        }

        let (access, remained) = split_correlated_access_conditions(
            ctx.oracle,
            &index.columns,
            &self.table_filters,
            eq_or_in_count,
        )
        .into_parts();

        let bound = access.len();
        self.access_conditions.extend(access);
        self.table_filters = remained;
        self.advance(PathStage::CorrelatedSplit)?;

        Ok(bound)
    }

    /// Move residual filters readable from the index entry alone into
    /// `index_filters`. Filters touching a prefix-only or non-key column
    /// stay table filters. Relative order is preserved in both lists.
    pub fn split_index_filters(&mut self) -> Result<(), PathError> {
        let PathKind::Index(index) = &self.kind else {
            return Err(PathError::NotAnIndexPath {
                operation: "index filter split",
            });
        };
        if !matches!(
            self.stage,
            PathStage::EqualityExtracted | PathStage::CorrelatedSplit
        ) {
            return Err(PathError::InvalidTransition {
                from: self.stage,
                to: PathStage::CorrelatedSplit,
            });
        }

        let (covered, uncovered): (Vec<_>, Vec<_>) = std::mem::take(&mut self.table_filters)
            .into_iter()
            .partition(|filter| {
                filter
                    .columns()
                    .iter()
                    .all(|column| index.covers(column.id))
            });

        self.index_filters.extend(covered);
        self.table_filters = uncovered;

        Ok(())
    }

    /// Record estimated counts and close the range-building stage.
    pub fn finish_ranges(
        &mut self,
        counts: SelectivityCounts,
        config: &PlannerConfig,
    ) -> Result<(), PathError> {
        if let Err(err) = counts.validate(config.check_selectivity) {
            warn!(path = %self, error = %err, "rejected selectivity counters");
            return Err(err);
        }

        self.advance(PathStage::RangesBuilt)?;
        self.counts = Some(counts);

        Ok(())
    }

    /// Column id to stored prefix length for every index column bound by an
    /// access condition. `None` means the full value is bound.
    #[must_use]
    pub fn bound_column_lengths(&self) -> BTreeMap<ColumnId, Option<u32>> {
        self.index_columns()
            .iter()
            .zip(&self.access_conditions)
            .map(|(key, _)| (key.column.id, key.prefix_length))
            .collect()
    }

    // Terminal transition driven by candidate selection. Discarding a merge
    // discards every branch with it.
    pub(crate) fn conclude(&mut self, stage: PathStage) -> Result<(), PathError> {
        self.advance(stage)?;
        if stage == PathStage::Discarded
            && let PathKind::IndexMerge { partial_paths, .. } = &mut self.kind
        {
            for partial in partial_paths {
                if !partial.stage.is_terminal() {
                    partial.conclude(PathStage::Discarded)?;
                }
            }
        }

        Ok(())
    }

    fn advance(&mut self, next: PathStage) -> Result<(), PathError> {
        let from = self.stage;
        self.stage = from.advance(next)?;
        debug!(path = %self, %from, to = %next, "access path stage");

        Ok(())
    }

    fn require_index(&self, operation: &'static str) -> Result<&IndexInfo, PathError> {
        self.index_info()
            .ok_or(PathError::NotAnIndexPath { operation })
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PathKind::Table { .. } => write!(f, "table")?,
            PathKind::Index(index) => write!(f, "index {}", index.name)?,
            PathKind::IndexMerge { partial_paths, .. } => {
                write!(f, "index_merge[{}]", partial_paths.len())?;
            }
        }
        if self.forced {
            write!(f, " forced")?;
        }

        Ok(())
    }
}
