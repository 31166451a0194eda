//! Admin gate.
//!
//! A single persisted flag that unlocks the catalog editor. It is switched on
//! by entering the shop's PIN and off by logging out. There is no expiry and
//! no hashing: this is a convenience gate for a shared counter, not a
//! security boundary.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::storage::{ADMIN_KEY, Storage, load_json, save_json};

/// The shop's admin PIN. Read only by [`AccessGate`].
pub(crate) const ADMIN_PIN: &str = "2468";

/// The persisted admin flag.
pub struct AccessGate {
    admin: bool,
    pin: SecretString,
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("admin", &self.admin)
            .field("pin", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl AccessGate {
    /// Rehydrate the flag from storage; anything unusable reads as logged out.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let admin = load_json(storage.as_ref(), ADMIN_KEY).unwrap_or(false);
        Self {
            admin,
            pin: SecretString::from(ADMIN_PIN.to_owned()),
            storage,
        }
    }

    /// Returns true while the editor is unlocked.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.admin
    }

    /// Unlock the editor if `pin` matches.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WrongPin` if the PIN does not match (the flag is
    /// left off), or `AuthError::Storage` if the flag cannot be persisted.
    #[instrument(skip_all)]
    pub fn login(&mut self, pin: &str) -> Result<(), AuthError> {
        if pin != self.pin.expose_secret() {
            tracing::warn!("Admin login rejected");
            return Err(AuthError::WrongPin);
        }
        self.admin = true;
        tracing::info!("Admin mode enabled");
        self.commit()
    }

    /// Lock the editor. Always succeeds in memory.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the flag cannot be persisted.
    #[instrument(skip_all)]
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.admin = false;
        tracing::info!("Admin mode disabled");
        self.commit()
    }

    fn commit(&self) -> Result<(), AuthError> {
        save_json(self.storage.as_ref(), ADMIN_KEY, &self.admin)?;
        Ok(())
    }
}
