mod split;

use crate::{
    expr::{Column, CorrelatedColumn, Datum, Expression, FuncName},
    model::{Collation, FieldType, IndexColumn, IndexInfo, TypeKind},
};

///
/// Fixtures
///
/// Table `t(a INT, b INT, c INT, d INT, s VARCHAR utf8mb4_bin, id INT)`
/// with outer reference `?outer.x`.
///

pub(super) fn col(name: &str) -> Column {
    match name {
        "a" => Column::new(1, "a", FieldType::plain(TypeKind::Int)),
        "b" => Column::new(2, "b", FieldType::plain(TypeKind::Int)),
        "c" => Column::new(3, "c", FieldType::plain(TypeKind::Int)),
        "d" => Column::new(4, "d", FieldType::plain(TypeKind::Int)),
        "s" => Column::new(5, "s", FieldType::varchar("utf8mb4_bin")),
        "id" => Column::new(6, "id", FieldType::plain(TypeKind::Int)),
        other => panic!("unknown fixture column {other}"),
    }
}

pub(super) fn int(value: i64) -> Expression {
    Expression::constant(Datum::Int(value), FieldType::plain(TypeKind::Int))
}

pub(super) fn outer() -> Expression {
    Expression::correlated(CorrelatedColumn::new(
        100,
        "outer.x",
        FieldType::plain(TypeKind::Int),
    ))
}

pub(super) fn eq(column: &str, value: Expression) -> Expression {
    Expression::eq(Expression::column(col(column)), value, Collation::binary())
}

pub(super) fn eq_ci(column: &str, text: &str) -> Expression {
    Expression::eq(
        Expression::column(col(column)),
        Expression::constant(Datum::from(text), FieldType::varchar("utf8mb4_general_ci")),
        Collation::new("utf8mb4_general_ci"),
    )
}

pub(super) fn gt(column: &str, value: i64) -> Expression {
    Expression::function(
        FuncName::Gt,
        vec![Expression::column(col(column)), int(value)],
        Collation::binary(),
    )
}

pub(super) fn full(names: &[&str]) -> Vec<IndexColumn> {
    names.iter().map(|name| IndexColumn::full(col(name))).collect()
}

pub(super) fn index(names: &[&str]) -> IndexInfo {
    IndexInfo::new(10, format!("idx_{}", names.join("")), full(names), false)
        .expect("fixture index should validate")
}
