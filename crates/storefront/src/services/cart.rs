//! Cart store.
//!
//! Holds at most one line per product. Adding a product that is already in
//! the cart bumps its quantity, clamped to the product's stock at that moment
//! (a stock of 0 still allows a quantity of 1). Manual quantity changes are
//! only floored at 1, never clamped to stock.

use std::sync::Arc;

use electrohome_core::{CartLine, Price, Product, ProductId};
use tracing::instrument;

use crate::storage::{CART_KEY, Storage, StorageError, load_json, save_json};

/// The shopping cart and its persistence hook.
pub struct CartStore {
    lines: Vec<CartLine>,
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Rehydrate the cart from storage, starting empty if nothing usable is
    /// stored.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let lines = load_json(storage.as_ref(), CART_KEY).unwrap_or_default();
        Self { lines, storage }
    }

    /// An empty cart. Nothing is written until the first mutation.
    #[must_use]
    pub fn empty(storage: Arc<dyn Storage>) -> Self {
        Self {
            lines: Vec::new(),
            storage,
        }
    }

    /// Cart lines in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == id)
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&mut self, product: &Product) -> Result<(), StorageError> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let bound = product.stock.max(1);
            line.quantity = line.quantity.saturating_add(1).min(bound);
            tracing::debug!(quantity = line.quantity, "Cart line incremented");
        } else {
            self.lines.push(CartLine::snapshot(product));
            tracing::debug!("Cart line added");
        }
        self.commit()
    }

    /// Shift a line's quantity by `delta`, never below 1.
    ///
    /// Unknown products are ignored. Stock is not consulted here.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn change_quantity(&mut self, id: &ProductId, delta: i64) -> Result<(), StorageError> {
        let Some(line) = self.lines.iter_mut().find(|l| &l.product_id == id) else {
            tracing::debug!("Quantity change for product not in cart ignored");
            return Ok(());
        };
        let shifted = i64::from(line.quantity).saturating_add(delta).max(1);
        line.quantity = u32::try_from(shifted).unwrap_or(u32::MAX);
        tracing::debug!(quantity = line.quantity, "Cart quantity changed");
        self.commit()
    }

    /// Remove a product's line. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove(&mut self, id: &ProductId) -> Result<bool, StorageError> {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product_id != id);
        if self.lines.len() == before {
            return Ok(false);
        }
        self.commit()?;
        Ok(true)
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Persist the full cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn commit(&self) -> Result<(), StorageError> {
        save_json(self.storage.as_ref(), CART_KEY, &self.lines)
    }
}
