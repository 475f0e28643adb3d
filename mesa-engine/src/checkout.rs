//! Checkout quote
//!
//! Combines the cart subtotal with the delivery fee. Product snapshots in
//! the cart are used as-is; prices are not re-fetched at checkout.

use crate::cart::Cart;
use crate::delivery::{DeliveryError, resolve_delivery_fee};
use crate::orders::money::{round_money, to_decimal, to_f64};
use serde::{Deserialize, Serialize};
use shared::models::DeliverySettings;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Product unavailable: {0}")]
    ProductUnavailable(String),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// How the order reaches the customer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Fulfillment {
    Pickup,
    Delivery { distance_km: f64 },
}

/// Checkout totals, rounded to cents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutQuote {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub total_items: i32,
}

pub fn quote_checkout(
    cart: &Cart,
    fulfillment: Fulfillment,
    settings: &DeliverySettings,
) -> Result<CheckoutQuote, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if let Some(line) = cart.lines().iter().find(|l| !l.product.is_available) {
        return Err(CheckoutError::ProductUnavailable(line.product.name.clone()));
    }

    let subtotal = round_money(cart.total_price_decimal());
    let delivery_fee = match fulfillment {
        Fulfillment::Pickup => 0.0,
        Fulfillment::Delivery { distance_km } => {
            resolve_delivery_fee(settings, distance_km, to_f64(subtotal))?.fee
        }
    };

    Ok(CheckoutQuote {
        subtotal: to_f64(subtotal),
        delivery_fee,
        total: to_f64(subtotal + to_decimal(delivery_fee)),
        total_items: cart.total_items(),
    })
}
