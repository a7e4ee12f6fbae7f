//! YAML run configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.datashare/          (mode 0700)
//!   config.yaml          (mode 0600)
//! ```
//!
//! # API pattern
//!
//! Every function touching the filesystem has two forms:
//! - `fn_at(home: &Path, …)`: explicit home; used in tests with `TempDir`
//! - `fn(…)`: derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! The password is never written here. [`ConnectionConfig::password_env`]
//! names the environment variable it is read from at connect time.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::ShareName;

/// Schemas that are never shared: system catalogs and Redshift internals.
pub const DEFAULT_EXCLUDED_SCHEMAS: [&str; 3] = ["information_schema", "pg_catalog", "pg_internal"];

pub const CONFIG_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// File model
// ---------------------------------------------------------------------------

/// TLS negotiation for the warehouse connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SslMode {
    Disable,
    Prefer,
    #[default]
    Require,
}

impl SslMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
        }
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how to reach the producer cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: String,
    pub user: String,
    #[serde(default = "default_password_env")]
    pub password_env: String,
    #[serde(default)]
    pub ssl_mode: SslMode,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl ConnectionConfig {
    pub fn new(
        host: impl Into<String>,
        database: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            database: database.into(),
            user: user.into(),
            password_env: default_password_env(),
            ssl_mode: SslMode::default(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Root of `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub share_name: ShareName,
    #[serde(default = "default_excluded_schemas")]
    pub excluded_schemas: BTreeSet<String>,
    pub connection: ConnectionConfig,
}

impl ConfigFile {
    pub fn new(share_name: impl Into<ShareName>, connection: ConnectionConfig) -> Self {
        Self {
            version: CONFIG_VERSION,
            share_name: share_name.into(),
            excluded_schemas: default_excluded_schemas(),
            connection,
        }
    }

    /// Reject values that would only fail later, against the warehouse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.share_name.0.trim().is_empty() {
            return Err(ConfigError::Invalid("share_name must not be empty".into()));
        }
        for (field, value) in [
            ("connection.host", &self.connection.host),
            ("connection.database", &self.connection.database),
            ("connection.user", &self.connection.user),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

fn default_port() -> u16 {
    5439
}

fn default_password_env() -> String {
    "DATASHARE_PASSWORD".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_excluded_schemas() -> BTreeSet<String> {
    DEFAULT_EXCLUDED_SCHEMAS.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Everything a single reconciliation run consumes. Built once, passed down
/// by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub share_name: ShareName,
    pub dry_run: bool,
    pub excluded_schemas: BTreeSet<String>,
}

impl RunConfig {
    pub fn new(share_name: impl Into<ShareName>, dry_run: bool) -> Self {
        Self {
            share_name: share_name.into(),
            dry_run,
            excluded_schemas: default_excluded_schemas(),
        }
    }

    /// Combine the file with command-line overrides.
    pub fn from_file(
        file: &ConfigFile,
        share_override: Option<&str>,
        dry_run: bool,
    ) -> Result<Self, ConfigError> {
        let share_name = match share_override {
            Some(name) if name.trim().is_empty() => {
                return Err(ConfigError::Invalid("--share must not be empty".into()))
            }
            Some(name) => ShareName::from(name),
            None => file.share_name.clone(),
        };
        Ok(Self {
            share_name,
            dry_run,
            excluded_schemas: file.excluded_schemas.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Load / save / init
// ---------------------------------------------------------------------------

/// `<home>/.datashare/config.yaml`: pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".datashare").join("config.yaml")
}

/// Load and validate the config file.
///
/// Returns `ConfigError::ConfigNotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(home: &Path) -> Result<ConfigFile, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound { path });
    }
    let contents = std::fs::read_to_string(&path)?;
    let file: ConfigFile =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })?;
    file.validate()?;
    Ok(file)
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<ConfigFile, ConfigError> {
    load_at(&home()?)
}

/// Atomically save the config: serialize → `config.yaml.tmp` → `chmod 0600` → `rename`.
pub fn save_at(home: &Path, file: &ConfigFile) -> Result<(), ConfigError> {
    file.validate()?;
    let path = config_path_at(home);
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            set_dir_permissions(dir)?;
        }
    }
    let tmp_path = path.with_file_name("config.yaml.tmp");

    let yaml = serde_yaml::to_string(file)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(())
}

/// `save_at` convenience wrapper.
pub fn save(file: &ConfigFile) -> Result<(), ConfigError> {
    save_at(&home()?, file)
}

/// Write `file` unless a config already exists.
///
/// Idempotent: an existing config is loaded and returned unchanged, paired
/// with `false`.
pub fn init_at(home: &Path, file: ConfigFile) -> Result<(ConfigFile, bool), ConfigError> {
    if config_path_at(home).exists() {
        return Ok((load_at(home)?, false));
    }
    save_at(home, &file)?;
    Ok((file, true))
}

/// `init_at` convenience wrapper.
pub fn init(file: ConfigFile) -> Result<(ConfigFile, bool), ConfigError> {
    init_at(&home()?, file)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ConfigFile {
        ConfigFile::new(
            "sales_share",
            ConnectionConfig::new("cluster.example.com", "dev", "admin"),
        )
    }

    #[test]
    fn config_path_is_correct() {
        let home = TempDir::new().unwrap();
        assert!(config_path_at(home.path()).ends_with(".datashare/config.yaml"));
    }

    #[test]
    fn defaults_match_original_denylist() {
        let file = sample();
        let expected: BTreeSet<String> = ["information_schema", "pg_catalog", "pg_internal"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(file.excluded_schemas, expected);
        assert_eq!(file.connection.port, 5439);
        assert_eq!(file.connection.password_env, "DATASHARE_PASSWORD");
        assert_eq!(file.connection.ssl_mode, SslMode::Require);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let home = TempDir::new().unwrap();
        save_at(home.path(), &sample()).expect("save");
        let loaded = load_at(home.path()).expect("load");
        assert_eq!(loaded, sample());
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let yaml = "version: 1\nshare_name: s\nconnection:\n  host: h\n  database: d\n  user: u\n";
        let file: ConfigFile = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(file.connection.port, 5439);
        assert_eq!(file.connection.connect_timeout_secs, 10);
        assert!(file.excluded_schemas.contains("pg_catalog"));
    }

    #[test]
    fn init_is_idempotent() {
        let home = TempDir::new().unwrap();
        let (_, created) = init_at(home.path(), sample()).expect("first init");
        assert!(created);

        let other = ConfigFile::new("other", ConnectionConfig::new("h", "d", "u"));
        let (existing, created) = init_at(home.path(), other).expect("second init");
        assert!(!created);
        assert_eq!(existing.share_name, ShareName::from("sales_share"));
    }

    #[test]
    fn empty_share_name_is_invalid() {
        let file = ConfigFile::new("  ", ConnectionConfig::new("h", "d", "u"));
        assert!(matches!(file.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn empty_host_is_invalid() {
        let file = ConfigFile::new("s", ConnectionConfig::new("", "d", "u"));
        let err = file.validate().unwrap_err();
        assert!(err.to_string().contains("connection.host"));
    }

    #[test]
    fn run_config_prefers_override() {
        let run = RunConfig::from_file(&sample(), Some("adhoc_share"), true).unwrap();
        assert_eq!(run.share_name, ShareName::from("adhoc_share"));
        assert!(run.dry_run);

        let run = RunConfig::from_file(&sample(), None, false).unwrap();
        assert_eq!(run.share_name, ShareName::from("sales_share"));
        assert!(!run.dry_run);
    }

    #[test]
    fn run_config_rejects_blank_override() {
        assert!(RunConfig::from_file(&sample(), Some(""), false).is_err());
    }

    #[test]
    fn home_not_found_error_message() {
        assert!(ConfigError::HomeNotFound.to_string().contains("home directory"));
    }
}
