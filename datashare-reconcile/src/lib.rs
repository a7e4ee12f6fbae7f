//! # datashare-reconcile
//!
//! Diffing, ordering, and fault-tolerant execution of datashare changes.
//!
//! Call [`pipeline::run`] to bring a share in line with the catalog, or
//! [`pipeline::preview_delta`] to compute the delta without touching it.
//! The pieces are usable on their own: [`diff()`] → [`plan()`] → [`execute`].

pub mod backend;
pub mod command;
pub mod diff;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod plan;

pub use backend::{BackendError, CatalogReader, ShareControlPlane, ShareRegistryReader, Warehouse};
pub use command::ShareCommand;
pub use diff::{diff, ReconciliationPlan};
pub use error::{ReconcileError, Snapshot};
pub use executor::{execute, ExecutionMode, ExecutionResult, OperationOutcome};
pub use pipeline::{RunObserver, RunReport};
pub use plan::{plan, Operation};
