use crate::{
    obs::sink::{self, MetricsEvent},
    plan::{AccessPath, PathError, PathStage},
};
use derive_more::{Deref, IntoIterator};
use tracing::debug;

///
/// CandidateSet
///
/// Every access path generated for one table in one compilation.
/// Exactly one candidate is selected; the rest are discarded with it.
///

#[derive(Clone, Debug, Default, Deref, IntoIterator)]
pub struct CandidateSet {
    #[deref]
    #[into_iterator(owned, ref)]
    paths: Vec<AccessPath>,
    selected: Option<usize>,
}

impl CandidateSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            paths: Vec::new(),
            selected: None,
        }
    }

    /// Add a candidate and return its position.
    pub fn push(&mut self, path: AccessPath) -> usize {
        self.paths.push(path);
        self.paths.len() - 1
    }

    #[must_use]
    pub fn has_forced(&self) -> bool {
        self.paths.iter().any(AccessPath::is_forced)
    }

    /// Candidates the cost comparator may rank: built paths whose counts
    /// never grow. When any candidate is forced by a hint, only forced
    /// candidates qualify and cost is moot.
    pub fn comparable(&self) -> impl Iterator<Item = (usize, &AccessPath)> + '_ {
        let forced_only = self.has_forced();

        self.paths.iter().enumerate().filter(move |(_, path)| {
            path.is_comparable() && (!forced_only || path.is_forced())
        })
    }

    /// Select the candidate at `position` and discard every other one.
    pub fn select(&mut self, position: usize) -> Result<&AccessPath, PathError> {
        if self.selected.is_some() {
            return Err(PathError::AlreadySelected);
        }
        let len = self.paths.len();
        let Some(winner) = self.paths.get(position) else {
            return Err(PathError::CandidateOutOfRange { position, len });
        };
        if !winner.is_forced() && self.has_forced() {
            return Err(PathError::ForcedCandidateSkipped { position });
        }
        // Counts recorded with `check_selectivity` off are re-checked here.
        if let Some(counts) = winner.counts() {
            counts.validate(true)?;
        }

        self.paths[position].conclude(PathStage::Selected)?;

        let mut discarded = 0;
        for (pos, path) in self.paths.iter_mut().enumerate() {
            if pos == position || path.stage().is_terminal() {
                continue;
            }
            path.conclude(PathStage::Discarded)?;
            discarded += 1;
        }

        self.selected = Some(position);
        debug!(position, discarded, winner = %self.paths[position], "selected access path");
        sink::record(MetricsEvent::Selection {
            discarded: discarded as u64,
        });

        Ok(&self.paths[position])
    }

    #[must_use]
    pub fn selected(&self) -> Option<&AccessPath> {
        self.selected.map(|position| &self.paths[position])
    }

    /// Consume the set, keeping only the selected path.
    #[must_use]
    pub fn into_selected(mut self) -> Option<AccessPath> {
        self.selected.map(|position| self.paths.swap_remove(position))
    }
}
