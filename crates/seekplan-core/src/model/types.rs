use crate::model::collation::Collation;
use serde::{Deserialize, Serialize};

///
/// TypeKind
///
/// Declared SQL type family of a column or expression result.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Int,
    UnsignedInt,
    Decimal,
    Double,
    Char,
    Varchar,
    Text,
    Blob,
    Enum,
    Set,
    Date,
    Datetime,
    Json,
}

impl TypeKind {
    /// True for types that evaluate as strings and therefore compare under
    /// a collation.
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(
            self,
            Self::Char | Self::Varchar | Self::Text | Self::Blob | Self::Enum | Self::Set
        )
    }
}

///
/// FieldType
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FieldType {
    pub kind: TypeKind,
    pub collation: Collation,
}

impl FieldType {
    #[must_use]
    pub const fn new(kind: TypeKind, collation: Collation) -> Self {
        Self { kind, collation }
    }

    /// Non-string type; the collation is fixed to `binary`.
    #[must_use]
    pub fn plain(kind: TypeKind) -> Self {
        Self::new(kind, Collation::binary())
    }

    #[must_use]
    pub fn varchar(collation: impl Into<Collation>) -> Self {
        Self::new(TypeKind::Varchar, collation.into())
    }

    #[must_use]
    pub const fn is_string(&self) -> bool {
        self.kind.is_string()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_kinds_are_classified() {
        for kind in [
            TypeKind::Char,
            TypeKind::Varchar,
            TypeKind::Text,
            TypeKind::Blob,
            TypeKind::Enum,
            TypeKind::Set,
        ] {
            assert!(kind.is_string(), "{kind:?} should be string-like");
        }

        for kind in [
            TypeKind::Int,
            TypeKind::UnsignedInt,
            TypeKind::Decimal,
            TypeKind::Double,
            TypeKind::Date,
            TypeKind::Datetime,
            TypeKind::Json,
        ] {
            assert!(!kind.is_string(), "{kind:?} should not be string-like");
        }
    }

    #[test]
    fn plain_types_use_binary_collation() {
        assert_eq!(FieldType::plain(TypeKind::Int).collation, Collation::binary());
    }
}
