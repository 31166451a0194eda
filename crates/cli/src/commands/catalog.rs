//! Catalog browsing and import/export commands.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! electrohome list --category electro --query pava
//!
//! # Back up and restore the catalog (admin mode)
//! electrohome catalog export --output catalogo.json
//! electrohome catalog import catalogo.json
//! ```

use std::io::Write;
use std::path::Path;

use electrohome_core::{CategoryFilter, Product};
use electrohome_storefront::Storefront;

use super::CommandError;

/// Default export file name.
pub const DEFAULT_EXPORT_FILE: &str = "catalogo.json";

/// Print products matching the filter, in catalog order.
pub fn list(
    storefront: &Storefront,
    filter: &CategoryFilter,
    query: &str,
    featured_only: bool,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let products: Vec<&Product> = storefront
        .visible_products(filter, query)
        .into_iter()
        .filter(|p| !featured_only || p.featured)
        .collect();

    if products.is_empty() {
        writeln!(out, "No products match.")?;
        return Ok(());
    }

    for product in &products {
        write_product(product, out)?;
    }
    writeln!(
        out,
        "{} of {} products ({filter})",
        products.len(),
        storefront.catalog().len()
    )?;
    Ok(())
}

fn write_product(product: &Product, out: &mut impl Write) -> std::io::Result<()> {
    let badge = if product.featured { " ★" } else { "" };
    writeln!(
        out,
        "{}  {}{badge}\n          {} · {} · stock {}",
        product.id,
        product.name,
        product.category,
        product.price.display(),
        product.stock
    )?;
    if !product.description.is_empty() {
        writeln!(out, "          {}", product.description)?;
    }
    if !product.tags.is_empty() {
        writeln!(out, "          #{}", product.tags.join(" #"))?;
    }
    Ok(())
}

/// Replace the catalog with the JSON array in `path`.
pub async fn import(
    storefront: &mut Storefront,
    path: &Path,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let count = storefront.import_catalog(&text)?;
    writeln!(out, "Imported {count} products from {}", path.display())?;
    Ok(())
}

/// Write the catalog as pretty-printed JSON to `path`.
pub async fn export(
    storefront: &Storefront,
    path: &Path,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let json = storefront.export_catalog()?;
    tokio::fs::write(path, json)
        .await
        .map_err(|source| CommandError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), "Catalog exported");
    writeln!(
        out,
        "Exported {} products to {}",
        storefront.catalog().len(),
        path.display()
    )?;
    Ok(())
}
