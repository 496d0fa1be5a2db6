//! Closed expression model consumed by the access-path planner.
//!
//! Only four node shapes exist at this layer. Every match site handles all
//! of them, so adding a shape is a compile error until each site decides.

mod datum;


use crate::model::{Collation, FieldType};
use derive_more::Display;
use std::fmt;

// re-exports
pub use datum::Datum;

///
/// ColumnId
///
/// Planner-wide unique column identifier. Two references with the same id
/// name the same column of the same table instance.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("#{_0}")]
pub struct ColumnId(pub u64);

///
/// Column
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    pub field_type: FieldType,
}

impl Column {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: ColumnId(id),
            name: name.into(),
            field_type,
        }
    }

    /// Full equivalence: same id, same declared type and collation.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.id == other.id && self.field_type == other.field_type
    }
}

///
/// Constant
///

#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    pub value: Datum,
    pub field_type: FieldType,
}

///
/// CorrelatedColumn
///
/// Column bound by an enclosing query scope. Its value is fixed for one
/// outer row, so it seeks like a constant inside the inner evaluation.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CorrelatedColumn {
    pub id: ColumnId,
    pub name: String,
    pub field_type: FieldType,
}

impl CorrelatedColumn {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: ColumnId(id),
            name: name.into(),
            field_type,
        }
    }
}

///
/// FuncName
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FuncName {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    And,
    Or,
    Not,
    Like,
    IsNull,
    Other(String),
}

impl fmt::Display for FuncName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::In => "in",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Like => "like",
            Self::IsNull => "isnull",
            Self::Other(name) => name.as_str(),
        };
        write!(f, "{label}")
    }
}

///
/// ScalarFunction
///
/// Operator or function application. `collation` is the collation the
/// function compares its string arguments under.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarFunction {
    pub name: FuncName,
    pub args: Vec<Expression>,
    pub collation: Collation,
}

impl ScalarFunction {
    #[must_use]
    pub const fn new(name: FuncName, args: Vec<Expression>, collation: Collation) -> Self {
        Self {
            name,
            args,
            collation,
        }
    }
}

///
/// Expression
///

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Column(Column),
    Constant(Constant),
    Correlated(CorrelatedColumn),
    Function(ScalarFunction),
}

impl Expression {
    #[must_use]
    pub const fn column(column: Column) -> Self {
        Self::Column(column)
    }

    #[must_use]
    pub const fn constant(value: Datum, field_type: FieldType) -> Self {
        Self::Constant(Constant { value, field_type })
    }

    #[must_use]
    pub const fn correlated(column: CorrelatedColumn) -> Self {
        Self::Correlated(column)
    }

    #[must_use]
    pub const fn function(name: FuncName, args: Vec<Self>, collation: Collation) -> Self {
        Self::Function(ScalarFunction::new(name, args, collation))
    }

    /// Equality comparison compared under `collation`.
    #[must_use]
    pub fn eq(left: Self, right: Self, collation: Collation) -> Self {
        Self::function(FuncName::Eq, vec![left, right], collation)
    }

    /// Every plain column referenced by this expression, in left-to-right
    /// order. Correlated references are not columns of the scanned table.
    #[must_use]
    pub fn columns(&self) -> Vec<&Column> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);

        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a Column>) {
        match self {
            Self::Column(column) => out.push(column),
            Self::Constant(_) | Self::Correlated(_) => {}
            Self::Function(func) => {
                for arg in &func.args {
                    arg.collect_columns(out);
                }
            }
        }
    }

    #[must_use]
    pub fn has_correlated(&self) -> bool {
        match self {
            Self::Correlated(_) => true,
            Self::Column(_) | Self::Constant(_) => false,
            Self::Function(func) => func.args.iter().any(Self::has_correlated),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(column) => write!(f, "{}", column.name),
            Self::Constant(constant) => write!(f, "{}", constant.value),
            Self::Correlated(column) => write!(f, "?{}", column.name),
            Self::Function(func) => {
                write!(f, "{}(", func.name)?;
                for (pos, arg) in func.args.iter().enumerate() {
                    if pos > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
