//! Sequential, fault-isolating execution of an operation sequence.
//!
//! Each operation is attempted exactly once, in the order given:
//!
//! - `DryRun`: render the statement, record `Previewed`, touch nothing.
//! - `Apply`: dispatch to the control plane. A rejection is recorded as
//!   `Skipped` and the run moves on; a connectivity failure aborts it.
//!
//! Names that cannot be rendered as identifiers are `Skipped` in both modes.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use datashare_core::ShareName;

use crate::backend::{BackendError, ShareControlPlane};
use crate::error::ReconcileError;
use crate::plan::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Apply,
    DryRun,
}

impl ExecutionMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            ExecutionMode::DryRun
        } else {
            ExecutionMode::Apply
        }
    }
}

/// What happened to one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ExecutionResult {
    Applied,
    Skipped(String),
    /// Dry-run: the statement that would have been sent.
    Previewed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationOutcome {
    pub operation: Operation,
    pub result: ExecutionResult,
}

/// Run `operations` against `control_plane`.
///
/// `on_outcome` sees every outcome as soon as it is known, so callers can
/// stream progress. The same outcomes are returned in order.
pub fn execute<C, F>(
    control_plane: &mut C,
    share: &ShareName,
    operations: &[Operation],
    mode: ExecutionMode,
    mut on_outcome: F,
) -> Result<Vec<OperationOutcome>, ReconcileError>
where
    C: ShareControlPlane + ?Sized,
    F: FnMut(&OperationOutcome),
{
    let mut outcomes = Vec::with_capacity(operations.len());

    for operation in operations {
        let result = match (operation.command(share), mode) {
            (Err(e), _) => {
                warn!(operation = %operation, reason = %e, "skipped: unrepresentable identifier");
                ExecutionResult::Skipped(e.to_string())
            }
            (Ok(command), ExecutionMode::DryRun) => {
                let sql = command.to_sql();
                debug!(operation = %operation, "[dry-run] {sql}");
                ExecutionResult::Previewed(sql)
            }
            (Ok(command), ExecutionMode::Apply) => {
                debug!(operation = %operation, "executing: {}", command.to_sql());
                match command.dispatch(control_plane) {
                    Ok(()) => {
                        info!(operation = %operation, "applied");
                        ExecutionResult::Applied
                    }
                    Err(BackendError::Rejected(reason)) => {
                        warn!(operation = %operation, reason = %reason, "skipped");
                        ExecutionResult::Skipped(reason)
                    }
                    Err(BackendError::Connectivity(message)) => {
                        error!(operation = %operation, "aborting run: {message}");
                        return Err(ReconcileError::Aborted {
                            operation: operation.clone(),
                            message,
                            completed: outcomes,
                        });
                    }
                }
            }
        };

        let outcome = OperationOutcome {
            operation: operation.clone(),
            result,
        };
        on_outcome(&outcome);
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
