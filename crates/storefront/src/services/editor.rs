//! Catalog editor sessions.
//!
//! An editor session owns a draft product. Setters only touch the draft; the
//! catalog sees nothing until [`EditorSession::save`], which hands the draft
//! to [`CatalogStore::update`] (so a draft whose ID is not in the catalog is
//! created). Dropping or cancelling the session discards the draft.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use electrohome_core::{Category, Price, Product, ProductId, coerce};
use tracing::instrument;

use crate::services::catalog::CatalogStore;
use crate::storage::StorageError;

/// A draft product being created or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    draft: Product,
    is_new: bool,
}

impl EditorSession {
    /// Start a blank draft with a fresh ID.
    #[must_use]
    pub fn create() -> Self {
        Self {
            draft: Product {
                id: ProductId::generate(),
                category: Category::Bazar,
                ..Product::default()
            },
            is_new: true,
        }
    }

    /// Start editing a copy of `product`.
    #[must_use]
    pub fn edit(product: &Product) -> Self {
        Self {
            draft: product.clone(),
            is_new: false,
        }
    }

    /// Returns true if this session started from a blank draft.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.is_new
    }

    /// The current draft.
    #[must_use]
    pub const fn draft(&self) -> &Product {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.draft.category = category;
    }

    /// Set the price from user input. Unparseable input becomes 0.
    pub fn set_price(&mut self, input: &str) {
        self.draft.price = Price::parse_lenient(input);
    }

    /// Set the stock from user input. Unparseable input becomes 0.
    pub fn set_stock(&mut self, input: &str) {
        self.draft.stock = coerce::parse_count(input);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    /// Set tags from comma-separated input.
    pub fn set_tags(&mut self, csv: &str) {
        self.draft.tags = parse_tags(csv);
    }

    pub const fn set_featured(&mut self, featured: bool) {
        self.draft.featured = featured;
    }

    /// Attach an image by embedding it as a `data:` URL.
    ///
    /// No size limit, format check or compression.
    pub fn attach_image(&mut self, bytes: &[u8], mime: &str) {
        self.draft.image = image_data_url(bytes, mime);
    }

    /// Read an image file and attach it.
    ///
    /// The MIME type is guessed from the file extension. The draft is only
    /// touched once the whole file has been read.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read; the draft is left
    /// unchanged.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn attach_image_file(&mut self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        tracing::debug!(bytes = bytes.len(), "Image read");
        self.attach_image(&bytes, guess_image_mime(path));
        Ok(())
    }

    pub fn clear_image(&mut self) {
        self.draft.image.clear();
    }

    /// Commit the draft to the catalog. Returns the product's ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be persisted.
    pub fn save(self, catalog: &mut CatalogStore) -> Result<ProductId, StorageError> {
        catalog.update(self.draft)
    }

    /// Discard the draft.
    pub fn cancel(self) {
        tracing::debug!(product_id = %self.draft.id, "Edit cancelled");
    }
}

/// Split comma-separated tags, trimming each and dropping empties and repeats.
/// First-seen order is kept.
#[must_use]
pub fn parse_tags(csv: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in csv.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_owned());
        }
    }
    tags
}

/// Encode bytes as a base64 `data:` URL.
#[must_use]
pub fn image_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Best-effort MIME type from a file extension.
#[must_use]
pub fn guess_image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
