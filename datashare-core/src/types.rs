//! Domain types for share reconciliation.
//!
//! Every collection is a `BTreeSet` so iteration order is lexicographic and
//! reproducible; nothing downstream depends on hash order.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A case-sensitive schema name. Equality is exact string identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaRef(pub String);

impl fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for SchemaRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SchemaRef {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Name of the datashare being reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareName(pub String);

impl fmt::Display for ShareName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ShareName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ShareName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// TableRef
// ---------------------------------------------------------------------------

/// A table qualified by its schema. Ordered by schema, then table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TableRef {
    pub schema: SchemaRef,
    pub table: String,
}

impl TableRef {
    pub fn new(schema: impl Into<SchemaRef>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

// ---------------------------------------------------------------------------
// ShareState
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of exposed (or existing) schemas and tables.
///
/// Captured once per run and never mutated afterwards; it holds no connection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShareState {
    pub schemas: BTreeSet<SchemaRef>,
    pub tables: BTreeSet<TableRef>,
}

impl ShareState {
    pub fn new(schemas: BTreeSet<SchemaRef>, tables: BTreeSet<TableRef>) -> Self {
        Self { schemas, tables }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from loose schema names and `(schema, table)` pairs.
    pub fn from_parts<S, T, A, B>(schemas: S, tables: T) -> Self
    where
        S: IntoIterator,
        S::Item: Into<SchemaRef>,
        T: IntoIterator<Item = (A, B)>,
        A: Into<SchemaRef>,
        B: Into<String>,
    {
        Self {
            schemas: schemas.into_iter().map(Into::into).collect(),
            tables: tables
                .into_iter()
                .map(|(schema, table)| TableRef::new(schema, table))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.tables.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
