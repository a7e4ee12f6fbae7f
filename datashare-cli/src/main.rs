//! datashare: keep a Redshift datashare in step with the catalog.
//!
//! # Usage
//!
//! ```text
//! datashare init --share <name> --host <host> --database <db> --user <user> [--port 5439] ...
//! datashare diff [--share <name>] [--json]
//! datashare sync [--share <name>] [--dry-run]
//! ```

mod commands;
mod output;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, init::InitArgs, sync::SyncArgs};
use datashare_core::SslMode;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "datashare",
    version,
    about = "Reconcile a Redshift datashare with the schemas and tables in the catalog",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write ~/.datashare/config.yaml.
    Init(InitArgs),

    /// Show what the share is missing and what it exposes in excess.
    Diff(DiffArgs),

    /// Add and remove share objects until the share matches the catalog.
    Sync(SyncArgs),
}

// ---------------------------------------------------------------------------
// Shared SslMode argument: parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `SslMode` from CLI args.
#[derive(Debug, Clone, Default)]
pub struct SslModeArg(pub SslMode);

impl FromStr for SslModeArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "disable" => Ok(Self(SslMode::Disable)),
            "prefer" => Ok(Self(SslMode::Prefer)),
            "require" => Ok(Self(SslMode::Require)),
            other => Err(format!(
                "unknown ssl mode '{other}'; expected: disable, prefer, require"
            )),
        }
    }
}

impl fmt::Display for SslModeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<SslModeArg> for SslMode {
    fn from(s: SslModeArg) -> Self {
        s.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Sync(args) => args.run(),
    }
}

/// Logs go to stderr; stdout carries the summary and per-operation lines.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
