//! The storefront: catalog, cart and admin gate loaded once and driven
//! together.
//!
//! Front ends hold a single [`Storefront`] and call into it. Editor
//! operations (create, edit, delete, import, export) check the admin flag
//! here; the stores underneath do not.

use std::sync::Arc;

use electrohome_core::{CategoryFilter, Product, ProductId};
use tracing::instrument;
use url::Url;

use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::search::filter_products;
use crate::services::auth::AccessGate;
use crate::services::cart::CartStore;
use crate::services::catalog::CatalogStore;
use crate::services::checkout;
use crate::services::editor::EditorSession;
use crate::storage::Storage;

/// Storefront state shared by all front-end commands.
#[derive(Debug)]
pub struct Storefront {
    checkout_phone: String,
    catalog: CatalogStore,
    cart: CartStore,
    gate: AccessGate,
}

impl Storefront {
    /// Load the catalog, cart and admin flag from `storage`.
    ///
    /// Never fails: unusable stored state is logged and replaced by its
    /// default.
    #[must_use]
    pub fn open(config: &StorefrontConfig, storage: Arc<dyn Storage>) -> Self {
        let catalog = CatalogStore::load(Arc::clone(&storage));
        let cart = CartStore::load(Arc::clone(&storage));
        let gate = AccessGate::load(storage);

        tracing::debug!(
            products = catalog.len(),
            cart_lines = cart.lines().len(),
            admin = gate.is_admin(),
            "Storefront opened"
        );

        Self {
            checkout_phone: config.checkout_phone.clone(),
            catalog,
            cart,
            gate,
        }
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Get a reference to the cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.gate.is_admin()
    }

    /// Products matching `filter` and `query`, in catalog order.
    #[must_use]
    pub fn visible_products(&self, filter: &CategoryFilter, query: &str) -> Vec<&Product> {
        filter_products(self.catalog.list(), filter, query)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::ProductNotFound` if `id` is not in the
    /// catalog, or `StorefrontError::Storage` if the cart cannot be persisted.
    pub fn add_to_cart(&mut self, id: &ProductId) -> Result<()> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.clone()))?;
        self.cart.add(product)?;
        Ok(())
    }

    /// Shift a cart line's quantity by `delta`, never below 1.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Storage` if the cart cannot be persisted.
    pub fn change_quantity(&mut self, id: &ProductId, delta: i64) -> Result<()> {
        self.cart.change_quantity(id, delta)?;
        Ok(())
    }

    /// Drop a cart line. Returns whether a line was removed.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Storage` if the cart cannot be persisted.
    pub fn remove_from_cart(&mut self, id: &ProductId) -> Result<bool> {
        Ok(self.cart.remove(id)?)
    }

    /// The order message for the current cart.
    #[must_use]
    pub fn checkout_message(&self) -> String {
        checkout::order_message(&self.cart)
    }

    /// Build the checkout deep link for the current cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Checkout` if the cart is empty.
    pub fn checkout_link(&self) -> Result<Url> {
        Ok(checkout::checkout_link(&self.checkout_phone, &self.cart)?)
    }

    // =========================================================================
    // Admin gate
    // =========================================================================

    /// Enter admin mode.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Auth` if the PIN is wrong or the flag cannot
    /// be persisted.
    pub fn login(&mut self, pin: &str) -> Result<()> {
        self.gate.login(pin)?;
        Ok(())
    }

    /// Leave admin mode.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Auth` if the flag cannot be persisted.
    pub fn logout(&mut self) -> Result<()> {
        self.gate.logout()?;
        Ok(())
    }

    // =========================================================================
    // Editor (admin only)
    // =========================================================================

    /// Start a draft for a new product.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Unauthorized` outside admin mode.
    pub fn begin_create(&self) -> Result<EditorSession> {
        self.require_admin()?;
        Ok(EditorSession::create())
    }

    /// Start a draft from an existing product.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Unauthorized` outside admin mode, or
    /// `StorefrontError::ProductNotFound` if `id` is not in the catalog.
    pub fn begin_edit(&self, id: &ProductId) -> Result<EditorSession> {
        self.require_admin()?;
        self.catalog
            .get(id)
            .map(EditorSession::edit)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.clone()))
    }

    /// Commit a draft into the catalog. Returns the product's ID.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Unauthorized` outside admin mode (the draft
    /// is dropped), or `StorefrontError::Storage` if the catalog cannot be
    /// persisted.
    #[instrument(skip_all, fields(product_id = %session.draft().id, is_new = session.is_new()))]
    pub fn save_editor(&mut self, session: EditorSession) -> Result<ProductId> {
        self.require_admin()?;
        Ok(session.save(&mut self.catalog)?)
    }

    /// Remove a product from the catalog. Cart lines are left alone.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Unauthorized` outside admin mode, or
    /// `StorefrontError::Storage` if the catalog cannot be persisted.
    pub fn delete_product(&mut self, id: &ProductId) -> Result<bool> {
        self.require_admin()?;
        Ok(self.catalog.delete(id)?)
    }

    /// Replace the catalog with a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Unauthorized` outside admin mode, or
    /// `StorefrontError::Import` if the document is rejected.
    pub fn import_catalog(&mut self, text: &str) -> Result<usize> {
        self.require_admin()?;
        Ok(self.catalog.import_json(text)?)
    }

    /// Serialize the catalog as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Unauthorized` outside admin mode.
    pub fn export_catalog(&self) -> Result<String> {
        self.require_admin()?;
        Ok(self.catalog.export_json()?)
    }

    fn require_admin(&self) -> Result<()> {
        if self.gate.is_admin() {
            Ok(())
        } else {
            tracing::warn!("Editor operation refused outside admin mode");
            Err(StorefrontError::Unauthorized)
        }
    }
}
