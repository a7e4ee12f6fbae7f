//! In-memory warehouse used by the integration tests.
//!
//! The share side enforces the same preconditions the real control plane
//! does: a table needs its schema shared first, a schema with shared tables
//! cannot be removed, and duplicates/absent objects are rejected.

#![allow(dead_code)]

use std::collections::BTreeSet;

use datashare_core::{Identifier, SchemaRef, ShareName, ShareState, TableRef};
use datashare_reconcile::{BackendError, CatalogReader, ShareControlPlane, ShareRegistryReader};

#[derive(Debug, Default)]
pub struct InMemoryWarehouse {
    pub catalog: ShareState,
    pub share: ShareState,
    pub include_new: BTreeSet<SchemaRef>,
    /// Every mutating call, as `<verb> <target>`.
    pub mutations: Vec<String>,
    /// Calls (same format as `mutations`) that get rejected.
    pub reject: BTreeSet<String>,
    /// After this many mutating calls, the session drops.
    pub disconnect_after: Option<usize>,
    pub catalog_offline: bool,
}

impl InMemoryWarehouse {
    pub fn new(catalog: ShareState, share: ShareState) -> Self {
        Self {
            catalog,
            share,
            ..Default::default()
        }
    }

    fn mutate(
        &mut self,
        call: String,
        apply: impl FnOnce(&mut Self) -> Result<(), String>,
    ) -> Result<(), BackendError> {
        if let Some(limit) = self.disconnect_after {
            if self.mutations.len() >= limit {
                return Err(BackendError::Connectivity("server closed the connection".into()));
            }
        }
        self.mutations.push(call.clone());
        if self.reject.contains(&call) {
            return Err(BackendError::Rejected(format!("{call}: lock conflict")));
        }
        apply(self).map_err(BackendError::Rejected)
    }
}

pub fn state(schemas: &[&str], tables: &[(&str, &str)]) -> ShareState {
    ShareState::from_parts(schemas.iter().copied(), tables.iter().copied())
}

impl CatalogReader for InMemoryWarehouse {
    fn list_desired_state(
        &mut self,
        excluded_schemas: &BTreeSet<String>,
    ) -> Result<ShareState, BackendError> {
        if self.catalog_offline {
            return Err(BackendError::Connectivity("could not connect to server".into()));
        }
        let keep = |schema: &SchemaRef| !excluded_schemas.contains(&schema.0);
        Ok(ShareState {
            schemas: self.catalog.schemas.iter().filter(|s| keep(*s)).cloned().collect(),
            tables: self
                .catalog
                .tables
                .iter()
                .filter(|t| keep(&t.schema))
                .cloned()
                .collect(),
        })
    }
}

impl ShareRegistryReader for InMemoryWarehouse {
    fn list_actual_state(&mut self, _share: &ShareName) -> Result<ShareState, BackendError> {
        Ok(self.share.clone())
    }
}

impl ShareControlPlane for InMemoryWarehouse {
    fn add_schema(&mut self, _: &Identifier, schema: &Identifier) -> Result<(), BackendError> {
        let schema = SchemaRef::from(schema.as_str());
        self.mutate(format!("add_schema {schema}"), |w| {
            if !w.share.schemas.insert(schema.clone()) {
                return Err(format!("schema {schema} is already in the datashare"));
            }
            Ok(())
        })
    }

    fn enable_include_new(
        &mut self,
        _: &Identifier,
        schema: &Identifier,
    ) -> Result<(), BackendError> {
        let schema = SchemaRef::from(schema.as_str());
        self.mutate(format!("include_new {schema}"), |w| {
            if !w.share.schemas.contains(&schema) {
                return Err(format!("schema {schema} is not in the datashare"));
            }
            w.include_new.insert(schema);
            Ok(())
        })
    }

    fn add_table(
        &mut self,
        _: &Identifier,
        schema: &Identifier,
        table: &Identifier,
    ) -> Result<(), BackendError> {
        let table = TableRef::new(schema.as_str(), table.as_str());
        self.mutate(format!("add_table {table}"), |w| {
            if !w.share.schemas.contains(&table.schema) {
                return Err(format!("schema of {table} is not in the datashare"));
            }
            if !w.share.tables.insert(table.clone()) {
                return Err(format!("table {table} is already in the datashare"));
            }
            Ok(())
        })
    }

    fn drop_table(
        &mut self,
        _: &Identifier,
        schema: &Identifier,
        table: &Identifier,
    ) -> Result<(), BackendError> {
        let table = TableRef::new(schema.as_str(), table.as_str());
        self.mutate(format!("drop_table {table}"), |w| {
            if !w.share.tables.remove(&table) {
                return Err(format!("table {table} is not in the datashare"));
            }
            Ok(())
        })
    }

    fn drop_schema(&mut self, _: &Identifier, schema: &Identifier) -> Result<(), BackendError> {
        let schema = SchemaRef::from(schema.as_str());
        self.mutate(format!("drop_schema {schema}"), |w| {
            if w.share.tables.iter().any(|t| t.schema == schema) {
                return Err(format!("schema {schema} still has tables in the datashare"));
            }
            if !w.share.schemas.remove(&schema) {
                return Err(format!("schema {schema} is not in the datashare"));
            }
            w.include_new.remove(&schema);
            Ok(())
        })
    }
}
