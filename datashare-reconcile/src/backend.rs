//! Boundaries to the warehouse: the two snapshot readers and the share
//! control plane.
//!
//! Implementations are blocking; each call is one round trip.

use std::collections::BTreeSet;

use thiserror::Error;

use datashare_core::{Identifier, ShareName, ShareState};

/// Failure reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The session is gone or was never established. Fatal for the run.
    #[error("connectivity failure: {0}")]
    Connectivity(String),

    /// The warehouse rejected this one request (object already shared,
    /// already absent, lock conflict, ...). The session is still usable.
    #[error("{0}")]
    Rejected(String),
}

impl BackendError {
    pub fn is_connectivity(&self) -> bool {
        matches!(self, BackendError::Connectivity(_))
    }
}

/// Enumerates what exists in the source database.
pub trait CatalogReader {
    /// Every schema and `(schema, table)` pair, minus `excluded_schemas`.
    fn list_desired_state(
        &mut self,
        excluded_schemas: &BTreeSet<String>,
    ) -> Result<ShareState, BackendError>;
}

/// Enumerates what a share currently exposes.
pub trait ShareRegistryReader {
    fn list_actual_state(&mut self, share: &ShareName) -> Result<ShareState, BackendError>;
}

/// The five mutating share commands.
pub trait ShareControlPlane {
    fn add_schema(&mut self, share: &Identifier, schema: &Identifier) -> Result<(), BackendError>;

    fn enable_include_new(
        &mut self,
        share: &Identifier,
        schema: &Identifier,
    ) -> Result<(), BackendError>;

    fn add_table(
        &mut self,
        share: &Identifier,
        schema: &Identifier,
        table: &Identifier,
    ) -> Result<(), BackendError>;

    fn drop_table(
        &mut self,
        share: &Identifier,
        schema: &Identifier,
        table: &Identifier,
    ) -> Result<(), BackendError>;

    fn drop_schema(&mut self, share: &Identifier, schema: &Identifier)
        -> Result<(), BackendError>;
}

/// A single session that can do everything a run needs.
pub trait Warehouse: CatalogReader + ShareRegistryReader + ShareControlPlane {}

impl<T> Warehouse for T where T: CatalogReader + ShareRegistryReader + ShareControlPlane {}
