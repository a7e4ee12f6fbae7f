//! Error types for datashare-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load, with the offending file.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The config file did not exist at the expected path.
    #[error("config not found at {path}; run `datashare init` first")]
    ConfigNotFound { path: PathBuf },

    /// The file parsed but a required value is missing or malformed.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A name that cannot be carried as a control-plane identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier {name:?} contains a NUL character")]
    NulCharacter { name: String },

    #[error("identifier {name:?} is {len} bytes; the limit is {max}")]
    TooLong { name: String, len: usize, max: usize },
}
