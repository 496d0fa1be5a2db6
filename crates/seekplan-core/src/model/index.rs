use crate::{
    error::InternalError,
    expr::{Column, ColumnId},
};
use derive_more::Display;
use std::fmt;

///
/// IndexId
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{_0}")]
pub struct IndexId(pub u64);

///
/// IndexColumn
///
/// One key column of an index. `prefix_length = Some(n)` means the index
/// stores only the first `n` characters of the value, so a seek on it
/// cannot certify full-value equality.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexColumn {
    pub column: Column,
    pub prefix_length: Option<u32>,
}

impl IndexColumn {
    #[must_use]
    pub const fn full(column: Column) -> Self {
        Self {
            column,
            prefix_length: None,
        }
    }

    #[must_use]
    pub const fn prefix(column: Column, length: u32) -> Self {
        Self {
            column,
            prefix_length: Some(length),
        }
    }

    #[must_use]
    pub const fn is_full_length(&self) -> bool {
        self.prefix_length.is_none()
    }
}

///
/// IndexInfo
///
/// Catalog descriptor for one secondary or primary index.
/// `handle_column` is the clustered row handle stored in every entry, when
/// the table has one.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexInfo {
    pub id: IndexId,
    pub name: String,
    pub columns: Vec<IndexColumn>,
    pub unique: bool,
    pub handle_column: Option<Column>,
}

impl IndexInfo {
    /// Build a validated index descriptor.
    ///
    /// Rejects empty key lists, duplicate key columns, and zero-length
    /// prefixes; each would make column binding ambiguous.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        columns: Vec<IndexColumn>,
        unique: bool,
    ) -> Result<Self, InternalError> {
        let name = name.into();

        if columns.is_empty() {
            return Err(InternalError::catalog_invariant(format!(
                "index '{name}' has no key columns"
            )));
        }

        for (pos, key) in columns.iter().enumerate() {
            if key.prefix_length == Some(0) {
                return Err(InternalError::catalog_invariant(format!(
                    "index '{name}' column '{}' has a zero-length prefix",
                    key.column.name
                )));
            }
            if columns[..pos]
                .iter()
                .any(|earlier| earlier.column.id == key.column.id)
            {
                return Err(InternalError::catalog_invariant(format!(
                    "index '{name}' repeats column '{}'",
                    key.column.name
                )));
            }
        }

        Ok(Self {
            id: IndexId(id),
            name,
            columns,
            unique,
            handle_column: None,
        })
    }

    #[must_use]
    pub fn with_handle(mut self, handle: Column) -> Self {
        self.handle_column = Some(handle);
        self
    }

    /// Whether `column` is readable from an index entry without a row
    /// fetch. Prefix key columns only hold a truncated value.
    #[must_use]
    pub fn covers(&self, column: ColumnId) -> bool {
        self.columns
            .iter()
            .any(|key| key.is_full_length() && key.column.id == column)
            || self
                .handle_column
                .as_ref()
                .is_some_and(|handle| handle.id == column)
    }
}

impl fmt::Display for IndexInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self
            .columns
            .iter()
            .map(|key| match key.prefix_length {
                Some(length) => format!("{}({length})", key.column.name),
                None => key.column.name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        if self.unique {
            write!(f, "UNIQUE {}({columns})", self.name)
        } else {
            write!(f, "{}({columns})", self.name)
        }
    }
}

///
/// TESTS
///
