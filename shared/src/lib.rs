//! Shared types for the Mesa restaurant engines
//!
//! Plain data types used across crates and at the JSON boundary:
//! catalog models, delivery settings, cart lines and the order
//! command / event / snapshot types of the tab ledger.

pub mod cart;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use cart::CartLine;
pub use models::{DeliverySettings, DeliveryType, DiningTable, DistanceRange, ProductRef, TableStatus};
