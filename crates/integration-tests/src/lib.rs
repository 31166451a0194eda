//! Integration tests for the ElectroHome storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p electrohome-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart quantities, stock bounds and totals
//! - `catalog_lifecycle` - Editor create/edit/delete and import/export
//! - `persistence` - State written to disk and read back by a fresh storefront
//! - `admin_gate` - Editor operations refused outside admin mode
//!
//! Every test runs against its own temporary data directory.

use std::path::Path;
use std::sync::Arc;

use electrohome_core::{Category, Price, Product, ProductId};
use electrohome_storefront::storage::FileStorage;
use electrohome_storefront::{Storefront, StorefrontConfig};
use tempfile::TempDir;

/// The PIN typed at the counter to enter admin mode.
pub const ADMIN_PIN: &str = "2468";

/// A storefront backed by files in a private temporary directory.
///
/// The directory is removed when the context is dropped.
pub struct TestContext {
    dir: TempDir,
    config: StorefrontConfig,
}

impl TestContext {
    /// Create a context with an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = StorefrontConfig {
            data_dir: dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        };
        Self { dir, config }
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Open a storefront over the data directory, as a fresh process would.
    #[must_use]
    pub fn open(&self) -> Storefront {
        let storage = Arc::new(FileStorage::new(self.config.data_dir.clone()));
        Storefront::open(&self.config, storage)
    }

    /// Open a storefront already in admin mode.
    ///
    /// # Panics
    ///
    /// Panics if the admin flag cannot be persisted.
    #[must_use]
    pub fn open_admin(&self) -> Storefront {
        let mut storefront = self.open();
        storefront.login(ADMIN_PIN).expect("Failed to enter admin mode");
        storefront
    }

    /// Write a raw stored value, bypassing the stores.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_raw(&self, key: &str, value: &str) {
        std::fs::write(self.data_dir().join(format!("{key}.json")), value)
            .expect("Failed to write raw value");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a product with a fixed ID for scenario setup.
#[must_use]
pub fn product(id: &str, name: &str, price: u64, stock: u32) -> Product {
    Product::new(name, Category::Bazar, Price::from_units(price))
        .with_id(id)
        .with_stock(stock)
}

/// Import `products` into `storefront`, which must be in admin mode.
///
/// # Panics
///
/// Panics if the import is rejected.
pub fn install_catalog(storefront: &mut Storefront, products: &[Product]) {
    let json = serde_json::to_string(products).expect("Failed to encode products");
    storefront
        .import_catalog(&json)
        .expect("Failed to import products");
}

/// Shorthand for a product ID.
#[must_use]
pub fn id(value: &str) -> ProductId {
    ProductId::new(value)
}
