//! Unified error handling for storefront operations.
//!
//! Provides a unified `StorefrontError` type wrapping the per-service errors.
//! All [`Storefront`](crate::state::Storefront) operations return
//! `Result<T, StorefrontError>`.

use electrohome_core::ProductId;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::catalog::ImportError;
use crate::services::checkout::CheckoutError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Persisting state failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A catalog import was rejected.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Admin login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout link could not be built.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Catalog export could not be encoded.
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Product ID not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Editor operation attempted without admin mode.
    #[error("Unauthorized: admin mode required")]
    Unauthorized,
}

impl StorefrontError {
    /// Returns true for failures of the machine rather than of the input.
    ///
    /// These are the errors worth reporting to error tracking; everything
    /// else is the user's to fix.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Storage(_)
                | Self::Encode(_)
                | Self::Auth(AuthError::Storage(_))
                | Self::Import(ImportError::Storage(_))
                | Self::Checkout(CheckoutError::InvalidLink(_))
        )
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
