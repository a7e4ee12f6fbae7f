//! Set difference between what the catalog holds and what the share exposes.

use std::collections::BTreeSet;

use serde::Serialize;

use datashare_core::{SchemaRef, ShareState, TableRef};

/// The additions and removals that would make the share match the catalog.
///
/// `add_*` and `drop_*` never overlap on the same key. A table may appear in
/// `add_tables` while its schema is in `add_schemas` (and likewise for drops);
/// ordering, not membership, resolves that dependency.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReconciliationPlan {
    pub add_schemas: BTreeSet<SchemaRef>,
    pub add_tables: BTreeSet<TableRef>,
    pub drop_schemas: BTreeSet<SchemaRef>,
    pub drop_tables: BTreeSet<TableRef>,
}

impl ReconciliationPlan {
    pub fn is_empty(&self) -> bool {
        self.add_schemas.is_empty()
            && self.add_tables.is_empty()
            && self.drop_schemas.is_empty()
            && self.drop_tables.is_empty()
    }

    /// Number of operations [`crate::plan()`] will emit for this plan. Each
    /// added schema costs two: the add and the include-new toggle.
    pub fn operation_count(&self) -> usize {
        self.add_schemas.len() * 2
            + self.add_tables.len()
            + self.drop_tables.len()
            + self.drop_schemas.len()
    }
}

/// Compute the four plain set differences. Pure and deterministic.
pub fn diff(desired: &ShareState, actual: &ShareState) -> ReconciliationPlan {
    ReconciliationPlan {
        add_schemas: desired.schemas.difference(&actual.schemas).cloned().collect(),
        add_tables: desired.tables.difference(&actual.tables).cloned().collect(),
        drop_schemas: actual.schemas.difference(&desired.schemas).cloned().collect(),
        drop_tables: actual.tables.difference(&desired.tables).cloned().collect(),
    }
}
