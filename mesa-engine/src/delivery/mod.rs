//! Delivery pricing
//!
//! - [`resolve_delivery_fee`] - fee for a distance under the tenant's settings
//! - [`ranges`] - maintenance of contiguous distance tiers

pub mod ranges;
mod resolver;

pub use ranges::{RangeError, append_range, remove_range, update_range, validate_ranges};
pub use resolver::{DeliveryError, DeliveryQuote, resolve_delivery_fee};
