//! Product definitions for the workshop
//!
//! The goods customers can order and machines can craft. The first product
//! in the list doubles as the fallback used when order generation would
//! otherwise come up empty.

use serde::{Deserialize, Serialize};

use crate::simulation::types::ProductId;

/// A craftable product
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
}

/// The set of products the workshop sells
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new(names: &[&str]) -> Self {
        let products = names
            .iter()
            .enumerate()
            .map(|(i, name)| Product {
                id: ProductId(i as u32),
                name: name.to_string(),
            })
            .collect();
        ProductCatalog { products }
    }

    /// The standard furniture line-up
    pub fn standard() -> Self {
        ProductCatalog::new(&[
            "Chair",
            "Table",
            "Stool",
            "Bookshelf",
            "Lamp",
            "Bench",
            "Cabinet",
            "Desk",
        ])
    }

    /// All product ids, in catalog order
    pub fn ids(&self) -> Vec<ProductId> {
        self.products.iter().map(|p| p.id).collect()
    }

    /// Look up a product by id
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Display name for a product, or a placeholder if unknown
    pub fn name_of(&self, id: ProductId) -> &str {
        self.get(id).map(|p| p.name.as_str()).unwrap_or("Unknown")
    }

    /// The designated fallback product (first in the catalog)
    pub fn default_product(&self) -> Option<ProductId> {
        self.products.first().map(|p| p.id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = ProductCatalog::standard();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.default_product(), Some(ProductId(0)));
        assert_eq!(catalog.name_of(ProductId(0)), "Chair");
    }

    #[test]
    fn test_unknown_product_name() {
        let catalog = ProductCatalog::standard();
        assert_eq!(catalog.name_of(ProductId(999)), "Unknown");
    }

    #[test]
    fn test_ids_match_lookup() {
        let catalog = ProductCatalog::standard();
        for id in catalog.ids() {
            assert!(catalog.get(id).is_some());
        }
    }
}
