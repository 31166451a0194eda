//! Catalog store.
//!
//! Owns the ordered product list. New products are prepended so they show up
//! first; edits keep their position. Every mutation ends in [`CatalogStore::commit`],
//! which rewrites the whole catalog under [`CATALOG_KEY`].

use std::sync::Arc;

use electrohome_core::product::lenient_products;
use electrohome_core::{Product, ProductId};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use crate::seed::seed_catalog;
use crate::storage::{CATALOG_KEY, Storage, StorageError, load_json, save_json};

/// Errors that can occur when importing a catalog document.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document is not valid JSON.
    #[error("import is not a valid catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but is not an array.
    #[error("import must be a JSON array of products")]
    NotAnArray,

    /// The imported catalog could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The stored catalog document. Entries that are not product objects are
/// kept as blank products rather than discarding the whole list.
#[derive(Deserialize)]
#[serde(transparent)]
struct StoredCatalog(#[serde(deserialize_with = "lenient_products")] Vec<Product>);

/// The product catalog and its persistence hook.
pub struct CatalogStore {
    products: Vec<Product>,
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("products", &self.products.len())
            .finish_non_exhaustive()
    }
}

impl CatalogStore {
    /// Rehydrate the catalog from storage.
    ///
    /// Falls back to the demo catalog when nothing usable is stored. The demo
    /// catalog, and a stored one whose entries lacked IDs, is written back
    /// right away so generated IDs stay stable across restarts; a failed
    /// write is logged and otherwise ignored.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        if let Some(StoredCatalog(mut products)) = load_json(storage.as_ref(), CATALOG_KEY) {
            let assigned = assign_missing_ids(&mut products);
            let store = Self { products, storage };
            if assigned {
                tracing::info!("Assigned IDs to stored products without one");
                if let Err(e) = store.commit() {
                    tracing::warn!(error = %e, "Failed to persist catalog IDs");
                }
            }
            return store;
        }

        tracing::info!("No stored catalog, starting from the demo catalog");
        let store = Self {
            products: seed_catalog(),
            storage,
        };
        if let Err(e) = store.commit() {
            tracing::warn!(error = %e, "Failed to persist demo catalog");
        }
        store
    }

    /// Build a store around an explicit product list. Nothing is written
    /// until the first mutation.
    #[must_use]
    pub fn with_products(products: Vec<Product>, storage: Arc<dyn Storage>) -> Self {
        Self { products, storage }
    }

    /// All products, in display order.
    #[must_use]
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products flagged as featured, in display order.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    /// The first `count` products, as shown in the storefront's hero strip.
    #[must_use]
    pub fn highlights(&self, count: usize) -> &[Product] {
        self.products
            .get(..count.min(self.products.len()))
            .unwrap_or_default()
    }

    /// Add a product at the front of the catalog.
    ///
    /// Assigns a fresh ID if the product has none. No field validation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be persisted. The product
    /// stays in the in-memory catalog either way.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub fn create(&mut self, mut product: Product) -> Result<ProductId, StorageError> {
        if product.id.is_empty() {
            product.id = ProductId::generate();
        }
        let id = product.id.clone();
        self.products.insert(0, product);
        tracing::info!(product_id = %id, "Product created");
        self.commit()?;
        Ok(id)
    }

    /// Replace the product with the same ID, keeping its position.
    ///
    /// An unknown ID is treated exactly like [`create`](Self::create). There
    /// is no version check: the last write wins.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be persisted.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn update(&mut self, product: Product) -> Result<ProductId, StorageError> {
        let Some(slot) = self.products.iter_mut().find(|p| p.id == product.id) else {
            return self.create(product);
        };
        let id = product.id.clone();
        *slot = product;
        tracing::info!("Product updated");
        self.commit()?;
        Ok(id)
    }

    /// Remove a product. Returns whether anything was removed.
    ///
    /// Cart lines that reference the product are left alone.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be persisted.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn delete(&mut self, id: &ProductId) -> Result<bool, StorageError> {
        let before = self.products.len();
        self.products.retain(|p| &p.id != id);
        if self.products.len() == before {
            tracing::debug!("Delete of unknown product ignored");
            return Ok(false);
        }
        tracing::info!("Product deleted");
        self.commit()?;
        Ok(true)
    }

    /// Replace the whole catalog.
    ///
    /// Entries without an ID get a fresh one so they stay addressable;
    /// nothing else is checked or merged with the previous list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be persisted.
    #[instrument(skip_all, fields(count = products.len()))]
    pub fn replace_all(&mut self, mut products: Vec<Product>) -> Result<(), StorageError> {
        assign_missing_ids(&mut products);
        self.products = products;
        tracing::info!("Catalog replaced");
        self.commit()
    }

    /// Replace the catalog with a JSON document.
    ///
    /// The document must be an array. Entries that are not product objects
    /// are imported as blank products with a fresh ID. On a parse failure
    /// the catalog is left unchanged. Returns the number of imported products.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::NotAnArray` or `ImportError::Parse` for a bad
    /// document, or `ImportError::Storage` if the result cannot be persisted.
    pub fn import_json(&mut self, text: &str) -> Result<usize, ImportError> {
        let products = parse_import(text).inspect_err(|e| {
            tracing::warn!(error = %e, "Catalog import rejected, catalog unchanged");
        })?;
        let count = products.len();
        self.replace_all(products)?;
        Ok(count)
    }

    /// The full catalog as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.products)
    }

    /// Persist the full catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn commit(&self) -> Result<(), StorageError> {
        save_json(self.storage.as_ref(), CATALOG_KEY, &self.products)
    }
}

fn parse_import(text: &str) -> Result<Vec<Product>, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_array() {
        return Err(ImportError::NotAnArray);
    }
    Ok(lenient_products(value)?)
}

/// Give every product without an ID a fresh one. Returns whether any
/// were assigned.
fn assign_missing_ids(products: &mut [Product]) -> bool {
    let mut assigned = false;
    for product in products.iter_mut().filter(|p| p.id.is_empty()) {
        product.id = ProductId::generate();
        assigned = true;
    }
    assigned
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, NoopStorage};
    use electrohome_core::{Category, Price};

    fn product(id: &str, name: &str) -> Product {
        Product::new(name, Category::Bazar, Price::from_units(100)).with_id(id)
    }

    fn store(products: Vec<Product>) -> CatalogStore {
        CatalogStore::with_products(products, Arc::new(NoopStorage))
    }

    fn ids(store: &CatalogStore) -> Vec<&str> {
        store.list().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_load_empty_storage_uses_seed() {
        let store = CatalogStore::load(Arc::new(MemoryStorage::new()));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_seed_ids_stable_across_loads() {
        let storage = Arc::new(MemoryStorage::new());
        let first = CatalogStore::load(storage.clone());
        assert!(storage.get(CATALOG_KEY).unwrap().is_some());
        let second = CatalogStore::load(storage);
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_load_corrupt_storage_uses_seed() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(CATALOG_KEY, "[{").unwrap();
        let store = CatalogStore::load(storage);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_load_stored_empty_catalog_stays_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(CATALOG_KEY, "[]").unwrap();
        let store = CatalogStore::load(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_prepends_and_assigns_id() {
        let mut store = store(vec![product("a", "A")]);
        let id = store.create(Product::new("B", Category::Electro, Price::ZERO)).unwrap();
        assert!(!id.is_empty());
        assert_eq!(store.list()[0].id, id);
        assert_eq!(store.list()[1].id.as_str(), "a");
    }

    #[test]
    fn test_create_keeps_existing_id() {
        let mut store = store(vec![]);
        let id = store.create(product("given", "G")).unwrap();
        assert_eq!(id.as_str(), "given");
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut store = store(vec![product("a", "A"), product("b", "B"), product("c", "C")]);
        let mut edited = product("b", "B2");
        edited.stock = 9;
        store.update(edited).unwrap();
        assert_eq!(ids(&store), vec!["a", "b", "c"]);
        assert_eq!(store.list()[1].name, "B2");
        assert_eq!(store.list()[1].stock, 9);
    }

    #[test]
    fn test_update_unknown_id_behaves_like_create() {
        let mut store = store(vec![product("a", "A")]);
        store.update(product("z", "Z")).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(ids(&store), vec!["z", "a"]);
    }

    #[test]
    fn test_delete() {
        let mut store = store(vec![product("a", "A"), product("b", "B")]);
        assert!(store.delete(&ProductId::new("a")).unwrap());
        assert_eq!(ids(&store), vec!["b"]);
        assert!(!store.delete(&ProductId::new("missing")).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replace_all_round_trip_is_noop() {
        let mut store = store(vec![product("a", "A"), product("b", "B")]);
        let before = store.list().to_vec();
        store.replace_all(store.list().to_vec()).unwrap();
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_replace_all_fills_missing_ids() {
        let mut store = store(vec![]);
        store
            .replace_all(vec![Product::new("X", Category::Perfume, Price::ZERO)])
            .unwrap();
        assert!(!store.list()[0].id.is_empty());
    }

    #[test]
    fn test_import_object_leaves_catalog_unchanged() {
        let mut store = store(vec![product("a", "A")]);
        let err = store.import_json(r#"{"name": "not a list"}"#).unwrap_err();
        assert!(matches!(err, ImportError::NotAnArray));
        assert_eq!(ids(&store), vec!["a"]);
    }

    #[test]
    fn test_import_garbage_leaves_catalog_unchanged() {
        let mut store = store(vec![product("a", "A")]);
        assert!(matches!(
            store.import_json("not json").unwrap_err(),
            ImportError::Parse(_)
        ));
        assert_eq!(ids(&store), vec!["a"]);
    }

    #[test]
    fn test_import_mixed_entries_are_accepted() {
        let mut store = store(vec![product("a", "A")]);
        let count = store
            .import_json(r#"[1, null, "x", {"id": "b", "name": "B"}]"#)
            .unwrap();
        assert_eq!(count, 4);
        assert_eq!(store.len(), 4);
        assert!(store.list().iter().all(|p| !p.id.is_empty()));
        assert_eq!(store.list()[3].name, "B");
        assert!(store.get(&ProductId::new("a")).is_none());
    }

    #[test]
    fn test_load_keeps_good_entries_next_to_bad_ones() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(CATALOG_KEY, r#"[{"id": "a", "name": "A"}, 7, {"id": "b", "name": "B"}]"#)
            .unwrap();
        let store = CatalogStore::load(storage.clone());
        assert_eq!(store.len(), 3);
        assert_eq!(store.list()[0].id.as_str(), "a");
        assert_eq!(store.list()[2].id.as_str(), "b");
        assert!(!store.list()[1].id.is_empty());

        let reloaded = CatalogStore::load(storage);
        assert_eq!(ids(&reloaded), ids(&store));
    }

    #[test]
    fn test_import_replaces_wholesale() {
        let mut store = store(vec![product("a", "A")]);
        let count = store
            .import_json(r#"[{"id": "x", "name": "X", "price": "10"}, {"id": "y"}]"#)
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(ids(&store), vec!["x", "y"]);
        assert_eq!(store.list()[0].price, Price::from_units(10));
    }

    #[test]
    fn test_export_then_import_is_identical() {
        let mut store = store(vec![product("a", "A"), product("b", "B")]);
        let before = store.list().to_vec();
        let exported = store.export_json().unwrap();
        assert!(exported.contains('\n'));
        store.import_json(&exported).unwrap();
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_mutations_persist() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = CatalogStore::with_products(vec![], storage.clone());
        store.create(product("a", "A")).unwrap();

        let reloaded = CatalogStore::load(storage);
        assert_eq!(ids(&reloaded), vec!["a"]);
    }

    #[test]
    fn test_featured_and_highlights() {
        let mut featured = product("b", "B");
        featured.featured = true;
        let store = store(vec![product("a", "A"), featured, product("c", "C")]);
        assert_eq!(store.featured().count(), 1);
        assert_eq!(store.highlights(2).len(), 2);
        assert_eq!(store.highlights(10).len(), 3);
    }
}
