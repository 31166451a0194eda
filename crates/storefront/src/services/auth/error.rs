//! Admin gate error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while toggling the admin flag.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The entered PIN does not match.
    #[error("incorrect admin PIN")]
    WrongPin,

    /// The flag could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
