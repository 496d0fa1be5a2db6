//! Module: model::collation
//! Responsibility: collation names and the compatibility oracle consulted
//! when a string column is compared under a filter's collation.
//! Does not own: string comparison or sort-key generation.

use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Collation
///
/// Lower-cased collation name as declared in the catalog (`utf8mb4_bin`,
/// `utf8mb4_general_ci`, ...).
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{_0}")]
pub struct Collation(String);

impl Collation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().to_ascii_lowercase())
    }

    #[must_use]
    pub fn binary() -> Self {
        Self("binary".to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Collation {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Collation {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

///
/// CollationOracle
///
/// Read-only compatibility check shared by every candidate evaluation.
/// Implementations must be total.
///

pub trait CollationOracle: Send + Sync {
    fn compatible(&self, left: &Collation, right: &Collation) -> bool;
}

///
/// FamilyCollations
///
/// Collations in the same family compare identically for equality seeks,
/// so an index built under one certifies equality under the other.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct FamilyCollations;

const GENERAL_CI: &[&str] = &["utf8_general_ci", "utf8mb4_general_ci"];
const BINARY: &[&str] = &["utf8_bin", "utf8mb4_bin", "latin1_bin", "ascii_bin", "binary"];
const UNICODE_CI: &[&str] = &["utf8_unicode_ci", "utf8mb4_unicode_ci"];

impl CollationOracle for FamilyCollations {
    fn compatible(&self, left: &Collation, right: &Collation) -> bool {
        if left == right {
            return true;
        }

        [GENERAL_CI, BINARY, UNICODE_CI].iter().any(|family| {
            family.contains(&left.as_str()) && family.contains(&right.as_str())
        })
    }
}

///
/// ExactCollations
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ExactCollations;

impl CollationOracle for ExactCollations {
    fn compatible(&self, left: &Collation, right: &Collation) -> bool {
        left == right
    }
}

///
/// CollationPolicy
///
/// Config-level selector for the built-in oracles.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollationPolicy {
    #[default]
    Families,
    Exact,
}

impl CollationPolicy {
    #[must_use]
    pub fn oracle(self) -> &'static dyn CollationOracle {
        match self {
            Self::Families => &FamilyCollations,
            Self::Exact => &ExactCollations,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn c(name: &str) -> Collation {
        Collation::new(name)
    }

    #[test]
    fn names_are_lower_cased() {
        assert_eq!(c("UTF8MB4_BIN"), c("utf8mb4_bin"));
        assert_eq!(c("UTF8MB4_BIN").to_string(), "utf8mb4_bin");
    }

    #[test]
    fn family_oracle_groups_known_families() {
        let oracle = FamilyCollations;

        assert!(oracle.compatible(&c("utf8_general_ci"), &c("utf8mb4_general_ci")));
        assert!(oracle.compatible(&c("latin1_bin"), &c("utf8mb4_bin")));
        assert!(oracle.compatible(&c("binary"), &c("utf8_bin")));
        assert!(oracle.compatible(&c("utf8mb4_unicode_ci"), &c("utf8_unicode_ci")));
        assert!(oracle.compatible(&c("gbk_chinese_ci"), &c("gbk_chinese_ci")));

        assert!(!oracle.compatible(&c("utf8mb4_bin"), &c("utf8mb4_general_ci")));
        assert!(!oracle.compatible(&c("utf8mb4_general_ci"), &c("utf8mb4_unicode_ci")));
        assert!(!oracle.compatible(&c("gbk_chinese_ci"), &c("gbk_bin")));
    }

    #[test]
    fn exact_oracle_requires_identical_names() {
        let oracle = ExactCollations;

        assert!(oracle.compatible(&c("utf8mb4_bin"), &c("utf8mb4_bin")));
        assert!(!oracle.compatible(&c("utf8_bin"), &c("utf8mb4_bin")));
    }

    #[test]
    fn policy_selects_oracle() {
        let left = c("utf8_bin");
        let right = c("utf8mb4_bin");

        assert!(CollationPolicy::Families.oracle().compatible(&left, &right));
        assert!(!CollationPolicy::Exact.oracle().compatible(&left, &right));
    }
}
