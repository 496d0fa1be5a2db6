//! Core of seekplan: the access-path record for candidate indexes and the
//! extraction of correlated/constant equality seek conditions.
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod expr;
pub mod model;
pub mod obs;
pub mod plan;

///
/// Prelude
///
/// Prelude contains only planning vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        config::{PlanContext, PlannerConfig},
        expr::{Column, CorrelatedColumn, Datum, Expression, FuncName},
        model::{Collation, FieldType, IndexColumn, IndexInfo, TypeKind},
        plan::{AccessPath, CandidateSet, PathStage, SelectivityCounts},
    };
}
