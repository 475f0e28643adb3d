//! Cart line type
//!
//! The storefront cart is an ordered list of lines, one per product.
//! The reducer operating on it lives in the engine crate.

use crate::models::ProductRef;
use serde::{Deserialize, Serialize};

/// One cart line: a product snapshot and its quantity (>= 1)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product: ProductRef,
    pub quantity: i32,
}

impl CartLine {
    pub fn new(product: ProductRef, quantity: i32) -> Self {
        Self { product, quantity }
    }

    pub fn product_id(&self) -> &str {
        &self.product.id
    }
}
