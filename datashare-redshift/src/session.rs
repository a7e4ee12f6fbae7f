//! One blocking session against the producer cluster.
//!
//! The driver is async; every call here is a single `block_on` round trip on
//! a current-thread runtime owned by the session. Nothing runs in the
//! background and no call overlaps another.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{ConnectOptions, Connection, PgConnection};
use tokio::runtime::Runtime;
use tracing::{debug, info};

use datashare_core::{ConnectionConfig, Identifier, ShareName, ShareState, SslMode};
use datashare_reconcile::{
    BackendError, CatalogReader, ShareCommand, ShareControlPlane, ShareRegistryReader,
};

use crate::error::classify;
use crate::objects::{
    catalog_state, share_state, CATALOG_SCHEMAS_SQL, CATALOG_TABLES_SQL, SHARE_OBJECTS_SQL,
};

pub struct RedshiftSession {
    runtime: Runtime,
    conn: PgConnection,
    endpoint: String,
}

impl fmt::Debug for RedshiftSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedshiftSession")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Driver options for `config`. The password is passed separately so it
/// never lives in the config struct.
pub fn connect_options(config: &ConnectionConfig, password: &str) -> PgConnectOptions {
    let ssl_mode = match config.ssl_mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
    };
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.user)
        .password(password)
        .ssl_mode(ssl_mode)
}

impl RedshiftSession {
    /// Open the session. Any failure here is a connectivity failure.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, BackendError> {
        let endpoint = format!("{}:{}/{}", config.host, config.port, config.database);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BackendError::Connectivity(format!("failed to start I/O runtime: {e}")))?;

        let password = std::env::var(&config.password_env).unwrap_or_default();
        let options = connect_options(config, &password);
        let timeout = Duration::from_secs(config.connect_timeout_secs);

        debug!(endpoint = %endpoint, user = %config.user, "connecting");
        let conn = runtime
            .block_on(tokio::time::timeout(timeout, options.connect()))
            .map_err(|_| {
                BackendError::Connectivity(format!(
                    "timed out after {}s connecting to {endpoint}",
                    config.connect_timeout_secs
                ))
            })?
            .map_err(|e| BackendError::Connectivity(format!("cannot connect to {endpoint}: {e}")))?;
        info!(endpoint = %endpoint, "connected");

        Ok(Self {
            runtime,
            conn,
            endpoint,
        })
    }

    /// Close the session gracefully.
    pub fn close(self) -> Result<(), BackendError> {
        let Self { runtime, conn, .. } = self;
        runtime.block_on(conn.close()).map_err(classify)
    }

    fn run(&mut self, command: ShareCommand) -> Result<(), BackendError> {
        let sql = command.to_sql();
        debug!(%sql, "executing");
        self.runtime
            .block_on(sqlx::raw_sql(&sql).execute(&mut self.conn))
            .map_err(classify)?;
        Ok(())
    }
}

impl CatalogReader for RedshiftSession {
    fn list_desired_state(
        &mut self,
        excluded_schemas: &BTreeSet<String>,
    ) -> Result<ShareState, BackendError> {
        let schemas: Vec<(String,)> = self
            .runtime
            .block_on(sqlx::query_as(CATALOG_SCHEMAS_SQL).fetch_all(&mut self.conn))
            .map_err(classify)?;
        let tables: Vec<(String, String)> = self
            .runtime
            .block_on(sqlx::query_as(CATALOG_TABLES_SQL).fetch_all(&mut self.conn))
            .map_err(classify)?;
        Ok(catalog_state(
            schemas.into_iter().map(|(s,)| s),
            tables,
            excluded_schemas,
        ))
    }
}

impl ShareRegistryReader for RedshiftSession {
    fn list_actual_state(&mut self, share: &ShareName) -> Result<ShareState, BackendError> {
        let rows: Vec<(String, String)> = self
            .runtime
            .block_on(
                sqlx::query_as(SHARE_OBJECTS_SQL)
                    .bind(&share.0)
                    .fetch_all(&mut self.conn),
            )
            .map_err(classify)?;
        Ok(share_state(rows))
    }
}

impl ShareControlPlane for RedshiftSession {
    fn add_schema(&mut self, share: &Identifier, schema: &Identifier) -> Result<(), BackendError> {
        self.run(ShareCommand::AddSchema {
            share: share.clone(),
            schema: schema.clone(),
        })
    }

    fn enable_include_new(
        &mut self,
        share: &Identifier,
        schema: &Identifier,
    ) -> Result<(), BackendError> {
        self.run(ShareCommand::EnableIncludeNew {
            share: share.clone(),
            schema: schema.clone(),
        })
    }

    fn add_table(
        &mut self,
        share: &Identifier,
        schema: &Identifier,
        table: &Identifier,
    ) -> Result<(), BackendError> {
        self.run(ShareCommand::AddTable {
            share: share.clone(),
            schema: schema.clone(),
            table: table.clone(),
        })
    }

    fn drop_table(
        &mut self,
        share: &Identifier,
        schema: &Identifier,
        table: &Identifier,
    ) -> Result<(), BackendError> {
        self.run(ShareCommand::DropTable {
            share: share.clone(),
            schema: schema.clone(),
            table: table.clone(),
        })
    }

    fn drop_schema(&mut self, share: &Identifier, schema: &Identifier) -> Result<(), BackendError> {
        self.run(ShareCommand::DropSchema {
            share: share.clone(),
            schema: schema.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConnectionConfig {
        let mut config = ConnectionConfig::new("cluster.example.com", "dev", "admin");
        config.port = 5440;
        config
    }

    #[test]
    fn options_carry_connection_settings() {
        let options = connect_options(&config(), "secret");
        assert_eq!(options.get_host(), "cluster.example.com");
        assert_eq!(options.get_port(), 5440);
        assert_eq!(options.get_database(), Some("dev"));
        assert_eq!(options.get_username(), "admin");
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Require));
    }

    #[test]
    fn ssl_mode_is_mapped() {
        let mut config = config();
        config.ssl_mode = SslMode::Disable;
        assert!(matches!(
            connect_options(&config, "").get_ssl_mode(),
            PgSslMode::Disable
        ));
    }

    #[test]
    fn refused_connection_is_connectivity_error() {
        let mut config = ConnectionConfig::new("127.0.0.1", "dev", "admin");
        config.port = 1;
        config.ssl_mode = SslMode::Disable;
        config.connect_timeout_secs = 5;
        let err = RedshiftSession::connect(&config).unwrap_err();
        assert!(err.is_connectivity(), "got: {err}");
    }
}
