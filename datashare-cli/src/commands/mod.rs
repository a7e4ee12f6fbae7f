//! Subcommand implementations.

pub mod diff;
pub mod init;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};

use datashare_core::{config, ConfigFile, RunConfig};

/// Load `~/.datashare/config.yaml` and fold in command-line overrides.
pub(crate) fn load_run_config(
    share: Option<&str>,
    dry_run: bool,
) -> Result<(ConfigFile, RunConfig)> {
    let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;
    let file = config::load_at(&home).context("failed to load configuration")?;
    let run = RunConfig::from_file(&file, share, dry_run)?;
    Ok((file, run))
}
