//! Error types for datashare-reconcile.

use std::fmt;

use thiserror::Error;

use crate::backend::BackendError;
use crate::executor::OperationOutcome;
use crate::plan::Operation;

/// Which snapshot was being read when a collaborator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snapshot {
    Catalog,
    ShareRegistry,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snapshot::Catalog => f.write_str("catalog"),
            Snapshot::ShareRegistry => f.write_str("share registry"),
        }
    }
}

/// Errors that end a run. Per-operation rejections never surface here; they
/// are recorded as skipped outcomes instead.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A snapshot could not be captured, so there is nothing to diff.
    #[error("failed to read {snapshot} snapshot: {source}")]
    Snapshot {
        snapshot: Snapshot,
        #[source]
        source: BackendError,
    },

    /// The control plane became unreachable mid-run. `completed` holds the
    /// outcomes recorded before the failing operation.
    #[error("run aborted at `{operation}`: {message}")]
    Aborted {
        operation: Operation,
        message: String,
        completed: Vec<OperationOutcome>,
    },
}
