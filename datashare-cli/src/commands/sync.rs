//! `datashare sync`: apply (or preview) the changes that align the share.

use anyhow::{Context, Result};
use clap::Args;

use datashare_reconcile::{pipeline, ReconcileError};
use datashare_redshift::RedshiftSession;

use crate::output::{self, ConsoleObserver};

/// Arguments for `datashare sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Datashare to reconcile (defaults to the configured one).
    #[arg(long, short = 's')]
    pub share: Option<String>,

    /// Print the statements that would run without changing the share.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let (file, run_config) = super::load_run_config(self.share.as_deref(), self.dry_run)?;

        let mut session = RedshiftSession::connect(&file.connection)
            .context("cannot open a session with the cluster")?;
        let mut observer = ConsoleObserver::new(run_config.share_name.clone(), self.dry_run);

        let report = match pipeline::run(&run_config, &mut session, &mut observer) {
            Ok(report) => report,
            Err(ReconcileError::Aborted {
                operation,
                message,
                completed,
            }) => {
                output::print_abort(&operation, &message, &completed);
                anyhow::bail!(
                    "sync aborted for '{}': lost connection at `{operation}`: {message}",
                    run_config.share_name
                );
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("sync failed for '{}'", run_config.share_name))
            }
        };

        if let Err(e) = session.close() {
            tracing::debug!("session close failed: {e}");
        }
        output::print_tally(&report);
        Ok(())
    }
}
