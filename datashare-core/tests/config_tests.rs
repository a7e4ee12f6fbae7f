//! Config error-message, atomic-write-safety, and permission tests.

use assert_fs::prelude::*;
use datashare_core::{
    config::{self, ConfigFile, ConnectionConfig},
    ConfigError,
};
use predicates::prelude::*;
use std::fs;

fn sample() -> ConfigFile {
    ConfigFile::new("sales_share", ConnectionConfig::new("cluster.local", "dev", "admin"))
}

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_config_points_at_init() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ConfigNotFound { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("config.yaml"), "got: {msg}");
    assert!(msg.contains("datashare init"), "got: {msg}");
}

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".datashare/config.yaml")
        .write_str(": : corrupt : yaml : !!!\n  - broken: [unclosed")
        .expect("write");

    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("config.yaml"));
}

#[test]
fn load_missing_connection_block_is_parse_error() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".datashare/config.yaml")
        .write_str("version: 1\nshare_name: sales_share\n")
        .expect("write");

    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

#[test]
fn load_blank_share_name_is_invalid() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".datashare/config.yaml")
        .write_str(
            "version: 1\nshare_name: ''\nconnection:\n  host: h\n  database: d\n  user: u\n",
        )
        .expect("write");

    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Atomic write safety
// ---------------------------------------------------------------------------

#[test]
fn save_cleans_up_tmp_file() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    config::save_at(home.path(), &sample()).expect("save");

    home.child(".datashare/config.yaml").assert(predicate::path::exists());
    home.child(".datashare/config.yaml.tmp")
        .assert(predicate::path::missing());
}

#[test]
fn saved_file_never_contains_a_password() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    config::save_at(home.path(), &sample()).expect("save");

    home.child(".datashare/config.yaml")
        .assert(predicate::str::contains("password_env: DATASHARE_PASSWORD"))
        .assert(predicate::str::contains("password:").not());
}

#[test]
#[cfg(unix)]
fn saved_file_and_dir_are_private() {
    use std::os::unix::fs::PermissionsExt;

    let home = assert_fs::TempDir::new().expect("tempdir");
    config::save_at(home.path(), &sample()).expect("save");

    let path = config::config_path_at(home.path());
    let file_mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(file_mode, 0o600);
    let dir_mode = fs::metadata(path.parent().unwrap()).unwrap().permissions().mode() & 0o777;
    assert_eq!(dir_mode, 0o700);
}

#[test]
fn save_refuses_invalid_config() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let file = ConfigFile::new("sales_share", ConnectionConfig::new("h", "", "u"));
    let err = config::save_at(home.path(), &file).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(!config::config_path_at(home.path()).exists());
}

// ---------------------------------------------------------------------------
// 3. Custom denylist survives a round trip
// ---------------------------------------------------------------------------

#[test]
fn custom_excluded_schemas_roundtrip() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let mut file = sample();
    file.excluded_schemas.insert("staging".to_string());
    config::save_at(home.path(), &file).expect("save");

    let loaded = config::load_at(home.path()).expect("load");
    assert!(loaded.excluded_schemas.contains("staging"));
    assert!(loaded.excluded_schemas.contains("pg_internal"));
}
