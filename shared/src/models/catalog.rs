//! Catalog lookups with placeholder fallback
//!
//! Admin listings resolve product and category names by ID. A missing
//! record degrades to a placeholder label instead of failing the listing.

use super::category::{CATEGORY_NOT_FOUND_LABEL, Category};
use super::product::{PRODUCT_NOT_FOUND_LABEL, Product};
use std::collections::HashMap;

/// In-memory catalog keyed by ID
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<String, Product>,
    categories: HashMap<String, Category>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
            categories: categories.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    /// Product name, or the not-found placeholder
    pub fn product_label(&self, id: &str) -> &str {
        self.product(id)
            .map(|p| p.name.as_str())
            .unwrap_or(PRODUCT_NOT_FOUND_LABEL)
    }

    /// Category name for a product's category, or "N/A"
    ///
    /// Products without a category also get the placeholder.
    pub fn category_label(&self, category_id: Option<&str>) -> &str {
        category_id
            .and_then(|id| self.category(id))
            .map(|c| c.name.as_str())
            .unwrap_or(CATEGORY_NOT_FOUND_LABEL)
    }

    /// Available products of a category, ordered for the storefront menu
    pub fn menu_for_category(&self, category_id: &str) -> Vec<&Product> {
        let mut items: Vec<&Product> = self
            .products
            .values()
            .filter(|p| p.is_available && p.category_id.as_deref() == Some(category_id))
            .collect();
        items.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
        items
    }
}
