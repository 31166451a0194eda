//! Demo catalog used when nothing has been stored yet.

use electrohome_core::{Category, Price, Product, ProductId};

/// Build the starter catalog. Each call generates fresh IDs.
#[must_use]
pub fn seed_catalog() -> Vec<Product> {
    vec![
        seed_product(
            "Set Stanley 1.0 L + Mate + Bombilla",
            Category::Bazar,
            54_999,
            12,
            "Termo 1000 ml, mate 180 ml, bombilla. Varios colores.",
            &["térmico", "mate"],
            true,
        ),
        seed_product(
            "Pava Eléctrica 2 L",
            Category::Electro,
            37_999,
            7,
            "1500W, corte automático, colores únicos.",
            &["electro"],
            true,
        ),
        seed_product(
            "Perfume Árabe Unisex 100 ml",
            Category::Perfume,
            45_999,
            25,
            "Fragancia intensa y original de larga duración.",
            &["fragancia"],
            false,
        ),
    ]
}

fn seed_product(
    name: &str,
    category: Category,
    price: u64,
    stock: u32,
    description: &str,
    tags: &[&str],
    featured: bool,
) -> Product {
    Product {
        id: ProductId::generate(),
        name: name.to_owned(),
        category,
        price: Price::from_units(price),
        stock,
        description: description.to_owned(),
        image: String::new(),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        featured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_shape() {
        let products = seed_catalog();
        assert_eq!(products.len(), 3);
        assert!(products.iter().all(|p| !p.id.is_empty()));
        assert_eq!(products.iter().filter(|p| p.featured).count(), 2);
    }
}
