//! Delivery fee resolver
//!
//! The limit check runs before any strategy: a distance beyond the
//! configured maximum is rejected, never capped.

use crate::orders::money::{to_decimal, to_f64};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{DeliverySettings, DeliveryType};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeliveryError {
    #[error("Distance must be a finite, non-negative number, got {0}")]
    InvalidDistance(f64),

    #[error("Distance {distance:.2} km exceeds delivery limit of {limit:.2} km")]
    BeyondDeliveryLimit { distance: f64, limit: f64 },

    #[error("No delivery range covers {0:.2} km")]
    OutOfRange(f64),
}

/// Resolved delivery fee
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryQuote {
    /// Fee rounded to cents
    pub fee: f64,
    pub is_free: bool,
    /// Index of the matched tier (RANGE_BASED only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_range: Option<usize>,
}

/// Compute the delivery fee for `distance_km` and an order subtotal
pub fn resolve_delivery_fee(
    settings: &DeliverySettings,
    distance_km: f64,
    order_subtotal: f64,
) -> Result<DeliveryQuote, DeliveryError> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(DeliveryError::InvalidDistance(distance_km));
    }

    if settings.has_delivery_limit && distance_km > settings.max_delivery_distance {
        return Err(DeliveryError::BeyondDeliveryLimit {
            distance: distance_km,
            limit: settings.max_delivery_distance,
        });
    }

    let distance = to_decimal(distance_km);
    let fixed = to_decimal(settings.fixed_cost);
    let per_km = to_decimal(settings.cost_per_km);

    let mut matched_range = None;
    let fee = match settings.delivery_type {
        DeliveryType::Fixed => fixed,
        DeliveryType::Variable => per_km * distance,
        DeliveryType::FixedPlusKm => fixed + per_km * distance,
        DeliveryType::FreeAboveValue => {
            if to_decimal(order_subtotal) >= to_decimal(settings.free_delivery_min_value) {
                Decimal::ZERO
            } else {
                fixed
            }
        }
        DeliveryType::RangeBased => {
            let (index, range) = settings
                .distance_ranges
                .iter()
                .enumerate()
                .find(|(_, r)| r.contains(distance_km))
                .ok_or(DeliveryError::OutOfRange(distance_km))?;
            matched_range = Some(index);
            if range.is_free {
                Decimal::ZERO
            } else {
                to_decimal(range.cost)
            }
        }
    };

    let fee = to_f64(fee);
    tracing::debug!(
        delivery_type = ?settings.delivery_type,
        distance_km,
        fee,
        "Delivery fee resolved"
    );

    Ok(DeliveryQuote {
        fee,
        is_free: fee == 0.0,
        matched_range,
    })
}
