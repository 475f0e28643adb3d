//! Mesa restaurant engines
//!
//! Library-level engines for a restaurant storefront and back office:
//!
//! - [`cart`] - storefront cart reducer, provider and persistence port
//! - [`delivery`] - delivery fee resolver and distance tier maintenance
//! - [`checkout`] - cart + delivery checkout quote
//! - [`orders`] - event-sourced dine-in tab ledger on redb
//! - [`core`] - configuration
//! - [`utils`] - logging

pub mod cart;
pub mod checkout;
pub mod core;
pub mod delivery;
pub mod orders;
pub mod utils;

pub use cart::{Cart, CartAction, CartError, CartProvider, CartStore, MemoryCartStore};
pub use checkout::{CheckoutError, CheckoutQuote, Fulfillment, quote_checkout};
pub use crate::core::{Config, ConfigError};
pub use delivery::{DeliveryError, DeliveryQuote, resolve_delivery_fee};
pub use orders::{OrderStorage, OrdersManager};
