//! Catalog editor commands (admin mode).
//!
//! # Usage
//!
//! ```bash
//! # Create a product
//! electrohome product create --name "Licuadora" --category electro \
//!     --price 29999 --stock 4 --tags "cocina, electro" --image licuadora.jpg
//!
//! # Edit only the fields given
//! electrohome product edit k3j9x0qa --price 31999 --featured true
//!
//! # Delete a product (cart lines referencing it are kept)
//! electrohome product delete k3j9x0qa
//! ```

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use electrohome_core::{Category, ProductId};
use electrohome_storefront::Storefront;
use electrohome_storefront::services::editor::EditorSession;

use super::CommandError;

/// Product fields settable from the command line. Omitted fields keep the
/// draft's value.
#[derive(Args, Debug, Default)]
pub struct ProductFields {
    /// Product name
    #[arg(long)]
    pub name: Option<String>,

    /// Category (bazar, electro, perfume)
    #[arg(long)]
    pub category: Option<Category>,

    /// Price in pesos; unparseable input is stored as 0
    #[arg(long)]
    pub price: Option<String>,

    /// Units in stock; unparseable input is stored as 0
    #[arg(long)]
    pub stock: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Show the featured badge (true/false)
    #[arg(long)]
    pub featured: Option<bool>,

    /// Image file to embed
    #[arg(long, conflicts_with = "clear_image")]
    pub image: Option<PathBuf>,

    /// Remove the current image
    #[arg(long)]
    pub clear_image: bool,
}

impl ProductFields {
    /// Apply the given fields to the draft. The image file is read last, so a
    /// missing file fails the command before anything is saved.
    async fn apply(self, session: &mut EditorSession) -> Result<(), CommandError> {
        if let Some(name) = self.name {
            session.set_name(name);
        }
        if let Some(category) = self.category {
            session.set_category(category);
        }
        if let Some(price) = self.price {
            session.set_price(&price);
        }
        if let Some(stock) = self.stock {
            session.set_stock(&stock);
        }
        if let Some(description) = self.description {
            session.set_description(description);
        }
        if let Some(tags) = self.tags {
            session.set_tags(&tags);
        }
        if let Some(featured) = self.featured {
            session.set_featured(featured);
        }
        if self.clear_image {
            session.clear_image();
        }
        if let Some(path) = self.image {
            let attached = session.attach_image_file(&path).await;
            attached.map_err(|source| CommandError::Read { path, source })?;
        }
        Ok(())
    }
}

/// Create a product from the given fields.
pub async fn create(
    storefront: &mut Storefront,
    fields: ProductFields,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut session = storefront.begin_create()?;
    fields.apply(&mut session).await?;
    let id = storefront.save_editor(session)?;
    writeln!(out, "Created product {id}.")?;
    Ok(())
}

/// Edit an existing product; only the given fields change.
pub async fn edit(
    storefront: &mut Storefront,
    id: &ProductId,
    fields: ProductFields,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut session = storefront.begin_edit(id)?;
    fields.apply(&mut session).await?;
    storefront.save_editor(session)?;
    writeln!(out, "Updated product {id}.")?;
    Ok(())
}

/// Delete a product.
pub fn delete(
    storefront: &mut Storefront,
    id: &ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if storefront.delete_product(id)? {
        writeln!(out, "Deleted product {id}.")?;
    } else {
        writeln!(out, "No product {id} in the catalog.")?;
    }
    Ok(())
}
