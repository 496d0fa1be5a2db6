//! Planner configuration and the read-only context shared by every
//! candidate evaluation for one query compilation.

use crate::{
    error::InternalError,
    model::{CollationOracle, CollationPolicy},
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// PlannerConfig
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Allow union-of-indexes paths for disjunctive predicates.
    pub index_merge: bool,

    /// Which built-in collation oracle string equality seeks consult.
    pub collation_policy: CollationPolicy,

    /// Reject selectivity counters that grow across filtering stages.
    pub check_selectivity: bool,
}

impl PlannerConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            index_merge: true,
            collation_policy: CollationPolicy::Families,
            check_selectivity: true,
        }
    }

    /// Parse a JSON config document. Missing keys take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, InternalError> {
        serde_json::from_str(text).map_err(|err| {
            InternalError::config_unsupported(format!("invalid planner config: {err}"))
        })
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new()
    }
}

///
/// PlanContext
///
/// Shared, immutable inputs for one compilation. Safe to share across
/// threads evaluating different candidates of the same table.
///

pub struct PlanContext<'a> {
    pub config: PlannerConfig,
    pub oracle: &'a dyn CollationOracle,
}

impl PlanContext<'static> {
    /// Context using the oracle named by `config.collation_policy`.
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            oracle: config.collation_policy.oracle(),
        }
    }
}

impl<'a> PlanContext<'a> {
    /// Context with a caller-supplied oracle; the policy in `config` is
    /// ignored.
    #[must_use]
    pub const fn with_oracle(config: PlannerConfig, oracle: &'a dyn CollationOracle) -> Self {
        Self { config, oracle }
    }
}

impl Default for PlanContext<'static> {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl fmt::Debug for PlanContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

///
/// TESTS
///
