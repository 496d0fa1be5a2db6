//! Catalog-facing vocabulary: declared column types, collations, and the
//! index descriptors the planner binds predicates against.

pub mod collation;
pub mod index;
pub mod types;

// re-exports
pub use collation::{Collation, CollationOracle, CollationPolicy, ExactCollations, FamilyCollations};
pub use index::{IndexColumn, IndexId, IndexInfo};
pub use types::{FieldType, TypeKind};
