//! Command implementations.
//!
//! Each command drives the [`Storefront`](electrohome_storefront::Storefront)
//! and writes its human-readable result to the given writer (stdout in the
//! binary, a buffer in tests). Diagnostics go through `tracing` to stderr.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod product;

use std::io;
use std::path::PathBuf;

use electrohome_storefront::StorefrontError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The storefront rejected the operation.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    /// An input file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output file could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to the terminal failed.
    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}

impl CommandError {
    /// Returns true if the error should be reported to Sentry.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::Storefront(err) => err.is_internal(),
            Self::Write { .. } => true,
            Self::Read { .. } | Self::Output(_) => false,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use electrohome_storefront::storage::MemoryStorage;
    use electrohome_storefront::{Storefront, StorefrontConfig};

    /// The PIN typed at the counter to enter admin mode.
    pub const ADMIN_PIN: &str = "2468";

    /// A storefront over fresh in-memory storage (demo catalog, empty cart).
    pub fn storefront() -> Storefront {
        Storefront::open(&StorefrontConfig::default(), Arc::new(MemoryStorage::new()))
    }

    /// Everything written to a test buffer, as text.
    #[allow(clippy::unwrap_used)]
    pub fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }
}
