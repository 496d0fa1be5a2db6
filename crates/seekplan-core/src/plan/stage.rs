use crate::plan::PathError;
use std::fmt;

///
/// PathStage
///
/// Lifecycle of one candidate path within a single compilation.
/// Transitions only move forward; `Selected` and `Discarded` are terminal.
/// Table paths skip the index-only stages.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum PathStage {
    Created,
    EqualityExtracted,
    CorrelatedSplit,
    RangesBuilt,
    Selected,
    Discarded,
}

impl PathStage {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Selected | Self::Discarded)
    }

    /// Validate a transition to `next`.
    ///
    /// Any non-terminal stage may move to a strictly later working stage or
    /// to `Discarded`; only `RangesBuilt` may become `Selected`.
    pub fn advance(self, next: Self) -> Result<Self, PathError> {
        let allowed = match next {
            _ if self.is_terminal() => false,
            Self::Created => false,
            Self::EqualityExtracted | Self::CorrelatedSplit | Self::RangesBuilt => next > self,
            Self::Selected => self == Self::RangesBuilt,
            Self::Discarded => true,
        };

        if allowed {
            Ok(next)
        } else {
            Err(PathError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for PathStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Created => "created",
            Self::EqualityExtracted => "equality_extracted",
            Self::CorrelatedSplit => "correlated_split",
            Self::RangesBuilt => "ranges_built",
            Self::Selected => "selected",
            Self::Discarded => "discarded",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
