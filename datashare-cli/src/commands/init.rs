//! `datashare init --share <name> --host <host> --database <db> --user <user>`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use datashare_core::{config, ConfigFile, ConnectionConfig};

use super::super::SslModeArg;

/// Write the run configuration.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Datashare to reconcile (e.g. "sales_share").
    #[arg(long, short = 's')]
    pub share: String,

    /// Cluster endpoint host name.
    #[arg(long)]
    pub host: String,

    /// Cluster port.
    #[arg(long, default_value_t = 5439)]
    pub port: u16,

    /// Producer database holding the shared schemas.
    #[arg(long, short = 'd')]
    pub database: String,

    /// Database user that owns the datashare.
    #[arg(long, short = 'u')]
    pub user: String,

    /// Environment variable the password is read from at connect time.
    #[arg(long, default_value = "DATASHARE_PASSWORD")]
    pub password_env: String,

    /// TLS mode: disable | prefer | require.
    #[arg(long, value_name = "MODE", default_value = "require")]
    pub ssl_mode: SslModeArg,

    /// Seconds to wait for the connection before giving up.
    #[arg(long, default_value_t = 10)]
    pub connect_timeout: u64,

    /// Extra schema to keep out of the share (repeatable). System schemas
    /// are always excluded.
    #[arg(long = "exclude", value_name = "SCHEMA")]
    pub exclude: Vec<String>,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;

        let mut connection = ConnectionConfig::new(self.host, self.database, self.user);
        connection.port = self.port;
        connection.password_env = self.password_env;
        connection.ssl_mode = self.ssl_mode.into();
        connection.connect_timeout_secs = self.connect_timeout;

        let mut file = ConfigFile::new(self.share, connection);
        file.excluded_schemas.extend(self.exclude);

        let (file, created) =
            config::init_at(&home, file).context("failed to write configuration")?;
        let path = config::config_path_at(&home);

        if created {
            println!("✓ Configured datashare '{}'", file.share_name);
            println!("  Saved to: {}", path.display());
            println!(
                "  Password is read from ${} at connect time.",
                file.connection.password_env
            );
        } else {
            println!(
                "✓ Already configured for datashare '{}' — left unchanged",
                file.share_name
            );
            println!("  Edit {} to change it.", path.display());
        }
        Ok(())
    }
}
