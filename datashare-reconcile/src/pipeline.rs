//! Shared reconciliation entrypoint used by the CLI.
//!
//! Snapshot → diff → plan → execute, strictly in sequence on one session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use datashare_core::{RunConfig, ShareName, ShareState};

use crate::backend::{CatalogReader, ShareRegistryReader, Warehouse};
use crate::diff::{diff, ReconciliationPlan};
use crate::error::{ReconcileError, Snapshot};
use crate::executor::{execute, ExecutionMode, ExecutionResult, OperationOutcome};
use crate::plan::{plan, Operation};

/// Progress hooks. All methods default to no-ops.
pub trait RunObserver {
    /// Called once, before any operation runs.
    fn plan_ready(&mut self, _plan: &ReconciliationPlan, _operations: &[Operation]) {}

    /// Called after each operation.
    fn outcome(&mut self, _outcome: &OperationOutcome) {}
}

impl RunObserver for () {}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub share_name: ShareName,
    pub dry_run: bool,
    pub plan: ReconciliationPlan,
    pub outcomes: Vec<OperationOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn applied(&self) -> usize {
        self.count(|r| matches!(r, ExecutionResult::Applied))
    }

    pub fn skipped(&self) -> usize {
        self.count(|r| matches!(r, ExecutionResult::Skipped(_)))
    }

    pub fn previewed(&self) -> usize {
        self.count(|r| matches!(r, ExecutionResult::Previewed(_)))
    }

    fn count(&self, pred: impl Fn(&ExecutionResult) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.result)).count()
    }
}

/// Capture `(desired, actual)`. Either read failing is fatal.
pub fn snapshot<B>(
    config: &RunConfig,
    backend: &mut B,
) -> Result<(ShareState, ShareState), ReconcileError>
where
    B: CatalogReader + ShareRegistryReader + ?Sized,
{
    let desired = backend
        .list_desired_state(&config.excluded_schemas)
        .map_err(|source| ReconcileError::Snapshot {
            snapshot: Snapshot::Catalog,
            source,
        })?;
    let actual = backend
        .list_actual_state(&config.share_name)
        .map_err(|source| ReconcileError::Snapshot {
            snapshot: Snapshot::ShareRegistry,
            source,
        })?;
    debug!(
        catalog_schemas = desired.schemas.len(),
        catalog_tables = desired.tables.len(),
        share_schemas = actual.schemas.len(),
        share_tables = actual.tables.len(),
        "snapshots captured"
    );
    Ok((desired, actual))
}

/// Compute the delta without planning or executing anything.
pub fn preview_delta<B>(
    config: &RunConfig,
    backend: &mut B,
) -> Result<ReconciliationPlan, ReconcileError>
where
    B: CatalogReader + ShareRegistryReader + ?Sized,
{
    let (desired, actual) = snapshot(config, backend)?;
    Ok(diff(&desired, &actual))
}

/// Run a full reconciliation of `config.share_name`.
pub fn run<B, O>(
    config: &RunConfig,
    backend: &mut B,
    observer: &mut O,
) -> Result<RunReport, ReconcileError>
where
    B: Warehouse + ?Sized,
    O: RunObserver + ?Sized,
{
    let started_at = Utc::now();
    let (desired, actual) = snapshot(config, backend)?;
    let reconciliation = diff(&desired, &actual);
    let operations = plan(&reconciliation);
    info!(
        share = %config.share_name,
        dry_run = config.dry_run,
        operations = operations.len(),
        "plan ready"
    );
    observer.plan_ready(&reconciliation, &operations);

    let outcomes = execute(
        backend,
        &config.share_name,
        &operations,
        ExecutionMode::from_dry_run(config.dry_run),
        |outcome| observer.outcome(outcome),
    )?;

    Ok(RunReport {
        share_name: config.share_name.clone(),
        dry_run: config.dry_run,
        plan: reconciliation,
        outcomes,
        started_at,
        finished_at: Utc::now(),
    })
}
