//! Key-value persistence for the storefront's aggregates.
//!
//! # Keys
//!
//! Each aggregate is stored as one JSON document under a fixed key:
//!
//! - `jx_store_products` - the catalog (array of products)
//! - `jx_cart` - the cart (array of cart lines)
//! - `jx_admin` - the admin flag (`true`/`false`)
//!
//! # Backends
//!
//! - [`FileStorage`] - one file per key in a data directory
//! - [`MemoryStorage`] - in-process map, for tests and throwaway sessions
//! - [`NoopStorage`] - remembers nothing, for exercising stores without a backend
//!
//! Stores never talk to a backend directly: they call [`load_json`] once at
//! start-up and [`save_json`] from their commit hook after every mutation.

mod file;
mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage key for the catalog.
pub const CATALOG_KEY: &str = "jx_store_products";
/// Storage key for the cart.
pub const CART_KEY: &str = "jx_cart";
/// Storage key for the admin flag.
pub const ADMIN_KEY: &str = "jx_admin";

/// Errors that can occur while reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized.
    #[error("failed to encode value for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A lock guarding an in-memory backend was poisoned.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A synchronous string key-value store.
///
/// No transactions: each call stands alone and the last write wins.
pub trait Storage: Send + Sync {
    /// Get the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStorage;

impl Storage for NoopStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Load and decode the JSON document under `key`.
///
/// Returns `None` when the key is absent, unreadable or holds a document that
/// does not decode as `T`. Failures are logged; they never abort start-up.
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored state, using default");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored state is corrupt, using default");
            None
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError::Encode` if serialization fails, or the backend's
/// error if the write fails.
pub fn save_json<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_owned(),
        source,
    })?;
    storage.set(key, &raw)
}
