//! Mapping of driver errors onto the reconciler's two failure kinds.

use datashare_reconcile::BackendError;

/// A server-side rejection keeps the session usable; anything that breaks
/// or never established the transport does not.
pub fn classify(err: sqlx::Error) -> BackendError {
    match err {
        sqlx::Error::Database(db) => {
            let message = match db.code() {
                Some(code) => format!("{} (SQLSTATE {code})", db.message()),
                None => db.message().to_string(),
            };
            BackendError::Rejected(message)
        }
        transport @ (sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::Configuration(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed) => BackendError::Connectivity(transport.to_string()),
        other => BackendError::Rejected(other.to_string()),
    }
}
