use crate::{
    expr::{Column, Expression, FuncName, ScalarFunction},
    model::CollationOracle,
};

///
/// EqualityMatch
///
/// Detailed outcome of matching one filter against one index column.
/// `CollationMismatch` is reported only when the shape qualifies.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EqualityMatch {
    Matched,
    CollationMismatch,
    NoMatch,
}

/// Whether `filter` is `column = <constant | correlated column>` in either
/// operand order, compared under a collation compatible with the column's.
#[must_use]
pub fn is_column_eq_correlated_or_constant(
    oracle: &dyn CollationOracle,
    filter: &Expression,
    column: &Column,
) -> bool {
    match_equality(oracle, filter, column) == EqualityMatch::Matched
}

pub(crate) fn match_equality(
    oracle: &dyn CollationOracle,
    filter: &Expression,
    column: &Column,
) -> EqualityMatch {
    let Expression::Function(func) = filter else {
        return EqualityMatch::NoMatch;
    };
    if func.name != FuncName::Eq {
        return EqualityMatch::NoMatch;
    }
    let [left, right] = func.args.as_slice() else {
        return EqualityMatch::NoMatch;
    };

    match match_operands(oracle, func, left, right, column) {
        EqualityMatch::NoMatch => match_operands(oracle, func, right, left, column),
        outcome => outcome,
    }
}

// Check one operand order: `column_side` must be the target column and
// `other` a seekable value.
fn match_operands(
    oracle: &dyn CollationOracle,
    func: &ScalarFunction,
    column_side: &Expression,
    other: &Expression,
    target: &Column,
) -> EqualityMatch {
    let Expression::Column(candidate) = column_side else {
        return EqualityMatch::NoMatch;
    };

    let seekable = match other {
        Expression::Constant(_) | Expression::Correlated(_) => true,
        Expression::Column(_) | Expression::Function(_) => false,
    };
    if !seekable || !candidate.equivalent(target) {
        return EqualityMatch::NoMatch;
    }

    if target.field_type.is_string()
        && !oracle.compatible(&func.collation, &target.field_type.collation)
    {
        return EqualityMatch::CollationMismatch;
    }

    EqualityMatch::Matched
}

///
/// TESTS
///
