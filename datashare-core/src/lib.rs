//! datashare core library: domain types, identifiers, configuration, errors.
//!
//! - [`types`]: schema/table references and share snapshots
//! - [`ident`]: validated control-plane identifiers
//! - [`config`]: `~/.datashare/config.yaml` load / save / init and [`RunConfig`]
//! - [`error`]: [`ConfigError`], [`IdentifierError`]

pub mod config;
pub mod error;
pub mod ident;
pub mod types;

pub use config::{ConfigFile, ConnectionConfig, RunConfig, SslMode};
pub use error::{ConfigError, IdentifierError};
pub use ident::Identifier;
pub use types::{SchemaRef, ShareName, ShareState, TableRef};
