//! Redshift collaborator: catalog reader, share registry reader, and share
//! control plane over one blocking session.
//!
//! ```ignore
//! let mut session = RedshiftSession::connect(&file.connection)?;
//! let report = datashare_reconcile::pipeline::run(&run_config, &mut session, &mut ())?;
//! ```

mod error;
pub mod objects;
mod session;

pub use error::classify;
pub use session::{connect_options, RedshiftSession};
