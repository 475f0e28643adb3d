//! Delivery Settings Model

use serde::{Deserialize, Serialize};

/// Delivery pricing strategy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryType {
    /// Flat fee
    #[default]
    Fixed,
    /// cost_per_km × distance
    Variable,
    /// fixed_cost + cost_per_km × distance
    FixedPlusKm,
    /// Free when the order subtotal reaches free_delivery_min_value
    FreeAboveValue,
    /// Fee looked up in distance_ranges
    RangeBased,
}

/// A distance tier `[min_distance, max_distance)` in km
///
/// Tiers are expected to be contiguous: `ranges[i].max_distance == ranges[i + 1].min_distance`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistanceRange {
    pub min_distance: f64,
    pub max_distance: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub is_free: bool,
}

impl DistanceRange {
    pub fn new(min_distance: f64, max_distance: f64, cost: f64) -> Self {
        Self {
            min_distance,
            max_distance,
            cost,
            is_free: false,
        }
    }

    pub fn free(min_distance: f64, max_distance: f64) -> Self {
        Self {
            min_distance,
            max_distance,
            cost: 0.0,
            is_free: true,
        }
    }

    /// Half-open containment check
    pub fn contains(&self, distance: f64) -> bool {
        self.min_distance <= distance && distance < self.max_distance
    }
}

/// Delivery settings (singleton per tenant)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DeliverySettings {
    pub delivery_type: DeliveryType,
    #[serde(default)]
    pub fixed_cost: f64,
    #[serde(default)]
    pub cost_per_km: f64,
    #[serde(default)]
    pub free_delivery_min_value: f64,
    #[serde(default)]
    pub has_delivery_limit: bool,
    #[serde(default)]
    pub max_delivery_distance: f64,
    #[serde(default)]
    pub distance_ranges: Vec<DistanceRange>,
}

impl DeliverySettings {
    pub fn fixed(fixed_cost: f64) -> Self {
        Self {
            delivery_type: DeliveryType::Fixed,
            fixed_cost,
            ..Default::default()
        }
    }

    pub fn range_based(distance_ranges: Vec<DistanceRange>) -> Self {
        Self {
            delivery_type: DeliveryType::RangeBased,
            distance_ranges,
            ..Default::default()
        }
    }

    /// Builder-style delivery limit
    pub fn with_limit(mut self, max_delivery_distance: f64) -> Self {
        self.has_delivery_limit = true;
        self.max_delivery_distance = max_delivery_distance;
        self
    }
}
