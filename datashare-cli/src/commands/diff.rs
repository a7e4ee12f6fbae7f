//! `datashare diff`: show the delta between catalog and share.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use datashare_reconcile::{pipeline, plan, Operation, ReconciliationPlan};
use datashare_redshift::RedshiftSession;

use crate::output;

/// Arguments for `datashare diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Datashare to compare (defaults to the configured one).
    #[arg(long, short = 's')]
    pub share: Option<String>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct DiffJson<'a> {
    share_name: &'a str,
    plan: &'a ReconciliationPlan,
    operations: &'a [Operation],
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let (file, run_config) = super::load_run_config(self.share.as_deref(), true)?;

        let mut session = RedshiftSession::connect(&file.connection)
            .context("cannot open a session with the cluster")?;
        let delta = pipeline::preview_delta(&run_config, &mut session)
            .with_context(|| format!("diff failed for '{}'", run_config.share_name))?;
        let operations = plan(&delta);
        if let Err(e) = session.close() {
            tracing::debug!("session close failed: {e}");
        }

        if self.json {
            let payload = DiffJson {
                share_name: &run_config.share_name.0,
                plan: &delta,
                operations: &operations,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize diff JSON")?
            );
            return Ok(());
        }

        output::print_delta_summary(&run_config.share_name, &delta);
        if operations.is_empty() {
            println!("No differences for '{}'.", run_config.share_name);
            return Ok(());
        }
        output::print_operation_table(&operations);
        println!("Run 'datashare sync --dry-run' to preview the statements.");
        Ok(())
    }
}
