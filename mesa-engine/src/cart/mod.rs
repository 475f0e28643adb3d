//! Storefront cart engine
//!
//! A cart is an ordered list of `(product, quantity)` lines, one per product.
//! Every operation is a total function `(lines, action) -> lines`; see
//! [`reduce`]. [`Cart`] wraps the list with method-style access.

mod provider;
mod store;

pub use provider::{CartHandle, CartProvider};
pub use store::{CartStore, MemoryCartStore};

use crate::orders::money::{MAX_QUANTITY, to_decimal};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use shared::cart::CartLine;
use shared::models::ProductRef;
use thiserror::Error;

/// Cart errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i32),

    #[error("Quantity exceeds maximum allowed ({max}), got {0}", max = MAX_QUANTITY)]
    QuantityTooLarge(i32),

    #[error("use_cart must be used within a CartProvider")]
    ProviderMissing,

    #[error("Cart store error: {0}")]
    Store(String),
}

/// Cart mutation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Merge into the existing line (additive) or append
    AddItem { product: ProductRef, quantity: i32 },
    /// Drop the line; no-op if absent
    RemoveItem { product_id: String },
    /// Set exactly `quantity`; `<= 0` removes the line
    UpdateQuantity { product_id: String, quantity: i32 },
    Clear,
}

/// Apply one action to a list of lines, returning the new list
///
/// The input is never modified. A rejected action leaves no trace.
pub fn reduce(lines: &[CartLine], action: &CartAction) -> Result<Vec<CartLine>, CartError> {
    let mut next = lines.to_vec();

    match action {
        CartAction::AddItem { product, quantity } => {
            if *quantity <= 0 {
                return Err(CartError::InvalidQuantity(*quantity));
            }
            match next.iter_mut().find(|l| l.product.id == product.id) {
                Some(line) => line.quantity = bounded(line.quantity.saturating_add(*quantity))?,
                None => next.push(CartLine::new(product.clone(), bounded(*quantity)?)),
            }
        }
        CartAction::RemoveItem { product_id } => {
            next.retain(|l| &l.product.id != product_id);
        }
        CartAction::UpdateQuantity {
            product_id,
            quantity,
        } => {
            if *quantity <= 0 {
                next.retain(|l| &l.product.id != product_id);
            } else if let Some(line) = next.iter_mut().find(|l| &l.product.id == product_id) {
                line.quantity = bounded(*quantity)?;
            }
        }
        CartAction::Clear => next.clear(),
    }

    Ok(next)
}

/// Per-line cap shared with tab lines
fn bounded(quantity: i32) -> Result<i32, CartError> {
    if quantity > MAX_QUANTITY {
        return Err(CartError::QuantityTooLarge(quantity));
    }
    Ok(quantity)
}

/// Σ quantity, saturating
///
/// Lines loaded from a store are not re-validated, so the sum can not
/// assume the per-line cap.
pub fn total_items(lines: &[CartLine]) -> i32 {
    lines.iter().fold(0i32, |acc, l| acc.saturating_add(l.quantity))
}

/// Σ price × quantity, exact (not rounded to cents)
pub fn total_price_decimal(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(|l| to_decimal(l.product.price) * Decimal::from(l.quantity))
        .sum()
}

/// Storefront cart
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Apply an action in place
    pub fn apply(&mut self, action: &CartAction) -> Result<(), CartError> {
        self.lines = reduce(&self.lines, action)?;
        Ok(())
    }

    pub fn add_item(&mut self, product: ProductRef, quantity: i32) -> Result<(), CartError> {
        self.apply(&CartAction::AddItem { product, quantity })
    }

    pub fn remove_item(&mut self, product_id: &str) -> Result<(), CartError> {
        self.apply(&CartAction::RemoveItem {
            product_id: product_id.to_string(),
        })
    }

    pub fn update_quantity(&mut self, product_id: &str, quantity: i32) -> Result<(), CartError> {
        self.apply(&CartAction::UpdateQuantity {
            product_id: product_id.to_string(),
            quantity,
        })
    }

    pub fn clear(&mut self) -> Result<(), CartError> {
        self.apply(&CartAction::Clear)
    }

    pub fn total_items(&self) -> i32 {
        total_items(&self.lines)
    }

    pub fn total_price_decimal(&self) -> Decimal {
        total_price_decimal(&self.lines)
    }

    pub fn total_price(&self) -> f64 {
        self.total_price_decimal().to_f64().unwrap_or_default()
    }
}
