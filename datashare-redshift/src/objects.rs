//! Turning catalog and `svv_datashare_objects` rows into snapshots.

use std::collections::BTreeSet;

use tracing::debug;

use datashare_core::{SchemaRef, ShareState, TableRef};

// Catalog columns are `sql_identifier`; cast so they decode as text.
pub const CATALOG_SCHEMAS_SQL: &str =
    "SELECT schema_name::varchar FROM information_schema.schemata";

pub const CATALOG_TABLES_SQL: &str = "SELECT table_schema::varchar, table_name::varchar \
     FROM information_schema.tables \
     WHERE table_type = 'BASE TABLE'";

pub const SHARE_OBJECTS_SQL: &str = "SELECT object_type::varchar, object_name::varchar \
     FROM svv_datashare_objects \
     WHERE share_name = $1 AND share_type = 'OUTBOUND'";

/// Build the desired state, dropping every excluded schema and its tables.
/// Matching is exact and case-sensitive.
pub fn catalog_state(
    schemas: impl IntoIterator<Item = String>,
    tables: impl IntoIterator<Item = (String, String)>,
    excluded_schemas: &BTreeSet<String>,
) -> ShareState {
    let schemas = schemas
        .into_iter()
        .filter(|s| !excluded_schemas.contains(s))
        .map(SchemaRef::from)
        .collect();
    let tables = tables
        .into_iter()
        .filter(|(schema, _)| !excluded_schemas.contains(schema))
        .map(|(schema, table)| TableRef::new(schema, table))
        .collect();
    ShareState::new(schemas, tables)
}

/// Build the actual state from `(object_type, object_name)` rows.
///
/// Table names arrive as `schema.table`; the first `.` separates them.
/// Views, functions, and other kinds are not managed and are ignored.
pub fn share_state(rows: impl IntoIterator<Item = (String, String)>) -> ShareState {
    let mut state = ShareState::empty();
    for (object_type, object_name) in rows {
        match object_type.trim().to_ascii_lowercase().as_str() {
            "schema" => {
                state.schemas.insert(SchemaRef::from(object_name));
            }
            "table" => match object_name.split_once('.') {
                Some((schema, table)) => {
                    state.tables.insert(TableRef::new(schema, table));
                }
                None => debug!(object_name = %object_name, "ignoring unqualified table entry"),
            },
            other => debug!(
                object_type = other,
                object_name = %object_name,
                "ignoring share object"
            ),
        }
    }
    state
}
