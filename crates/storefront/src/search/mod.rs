//! Catalog search.
//!
//! Browsing narrows the catalog by category and a free-text query. Matching
//! is plain case-insensitive substring containment over a product's name,
//! description and tags: no tokenizing, no ranking. Results keep catalog order.

use electrohome_core::{CategoryFilter, Product};

/// A browse request: category selector plus free-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub category: CategoryFilter,
    pub text: String,
}

impl SearchQuery {
    /// Create a query.
    #[must_use]
    pub fn new(category: CategoryFilter, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }

    /// Run the query against `products`.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        filter_products(products, &self.category, &self.text)
    }
}

/// Products in `category` whose text contains `query`, in input order.
///
/// The query is trimmed; an empty query matches everything.
#[must_use]
pub fn filter_products<'a>(
    products: &'a [Product],
    category: &CategoryFilter,
    query: &str,
) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| category.matches(&p.category))
        .filter(|p| needle.is_empty() || p.search_text().contains(&needle))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use electrohome_core::{Category, Price};

    fn catalog() -> Vec<Product> {
        let mut termo = Product::new("Termo Stanley", Category::Bazar, Price::from_units(54_999))
            .with_id("termo");
        termo.tags = vec!["mate".to_owned(), "térmico".to_owned()];

        let mut pava = Product::new("Pava Eléctrica", Category::Electro, Price::from_units(37_999))
            .with_id("pava");
        pava.description = "Corte automático para el MATE".to_owned();

        let perfume = Product::new("Perfume Árabe", Category::Perfume, Price::from_units(45_999))
            .with_id("perfume");

        let mut mate = Product::new("Mate de calabaza", Category::Bazar, Price::from_units(9_999))
            .with_id("mate");
        mate.tags = vec!["regalo".to_owned()];

        vec![termo, pava, perfume, mate]
    }

    fn ids(found: &[&Product]) -> Vec<String> {
        found.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_all_and_empty_query_returns_everything() {
        let products = catalog();
        let found = filter_products(&products, &CategoryFilter::All, "");
        assert_eq!(found.len(), products.len());
    }

    #[test]
    fn test_category_only() {
        let products = catalog();
        let found = filter_products(&products, &CategoryFilter::Only(Category::Bazar), "");
        assert_eq!(ids(&found), vec!["termo", "mate"]);
    }

    #[test]
    fn test_query_matches_name_description_and_tags() {
        let products = catalog();
        let found = filter_products(&products, &CategoryFilter::All, "mate");
        // tag, description, name
        assert_eq!(ids(&found), vec!["termo", "pava", "mate"]);
    }

    #[test]
    fn test_query_is_case_insensitive_and_trimmed() {
        let products = catalog();
        let found = filter_products(&products, &CategoryFilter::All, "  ÁRABE ");
        assert_eq!(ids(&found), vec!["perfume"]);
    }

    #[test]
    fn test_category_and_query_combine() {
        let products = catalog();
        let found = filter_products(&products, &CategoryFilter::Only(Category::Electro), "mate");
        assert_eq!(ids(&found), vec!["pava"]);
    }

    #[test]
    fn test_no_match() {
        let products = catalog();
        assert!(filter_products(&products, &CategoryFilter::All, "bicicleta").is_empty());
    }

    #[test]
    fn test_results_are_ordered_subsequence() {
        let products = catalog();
        let filters = [
            CategoryFilter::All,
            CategoryFilter::Only(Category::Bazar),
            CategoryFilter::Only(Category::Electro),
            CategoryFilter::Only(Category::Perfume),
            CategoryFilter::Only(Category::Unlisted("X".to_owned())),
        ];
        let queries = ["", "a", "mate", "é", "zzz", " P "];

        for filter in &filters {
            for query in queries {
                let found = filter_products(&products, filter, query);
                let mut cursor = products.iter();
                for hit in &found {
                    assert!(
                        cursor.any(|p| std::ptr::eq(p, *hit)),
                        "{filter} / {query:?} broke input order"
                    );
                }
            }
        }
    }

    #[test]
    fn test_search_query_apply() {
        let products = catalog();
        let query = SearchQuery::new(CategoryFilter::Only(Category::Perfume), "");
        assert_eq!(ids(&query.apply(&products)), vec!["perfume"]);
    }
}
