//! Order snapshot - tab state computed from the event stream
//!
//! The snapshot carries a `state_checksum` for drift detection: replaying
//! the stored events must reproduce the same checksum.

use super::types::{OrderItem, PaymentRecord};
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Default service charge rate (percent)
pub const DEFAULT_SERVICE_RATE: f64 = 10.0;

/// Order status
///
/// `Paid` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }
}

/// Table tab snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSnapshot {
    /// Order ID (assigned on OpenTable)
    pub order_id: String,
    pub table_id: String,
    pub table_number: i32,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub payments: Vec<PaymentRecord>,
    /// Whether the service charge is applied
    pub include_service: bool,
    /// Service charge rate in percent, frozen when the tab opens
    pub service_rate: f64,
    /// Σ item subtotals
    pub subtotal: f64,
    pub service_charge: f64,
    /// subtotal + service_charge
    pub total: f64,
    #[serde(default)]
    pub total_paid: f64,
    /// total - total_paid
    #[serde(default)]
    pub remaining_balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<i64>,
    /// Last applied event sequence
    pub last_sequence: u64,
    /// Hex checksum over items.len, total, total_paid, last_sequence and status
    #[serde(default)]
    pub state_checksum: String,
}

impl OrderSnapshot {
    /// Create a new empty tab
    pub fn new(order_id: String) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        let mut snapshot = Self {
            order_id,
            table_id: String::new(),
            table_number: 0,
            status: OrderStatus::Pending,
            items: Vec::new(),
            payments: Vec::new(),
            include_service: true,
            service_rate: DEFAULT_SERVICE_RATE,
            subtotal: 0.0,
            service_charge: 0.0,
            total: 0.0,
            total_paid: 0.0,
            remaining_balance: 0.0,
            notes: None,
            created_at: now,
            updated_at: now,
            closed_at: None,
            last_sequence: 0,
            state_checksum: String::new(),
        };
        snapshot.update_checksum();
        snapshot
    }

    /// Open (non-terminal) tab
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn is_paid(&self) -> bool {
        self.status == OrderStatus::Paid
    }

    pub fn find_item(&self, item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Total number of units on the tab
    pub fn total_quantity(&self) -> i32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Compute state checksum for drift detection
    ///
    /// Money is hashed in cents to avoid float noise. Returns 16 hex chars.
    pub fn compute_checksum(&self) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher as _;

        let mut hasher = DefaultHasher::new();
        self.items.len().hash(&mut hasher);
        ((self.total * 100.0).round() as i64).hash(&mut hasher);
        ((self.total_paid * 100.0).round() as i64).hash(&mut hasher);
        self.last_sequence.hash(&mut hasher);
        (self.status as u8).hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }

    pub fn update_checksum(&mut self) {
        self.state_checksum = self.compute_checksum();
    }

    /// Returns false when drift is detected
    pub fn verify_checksum(&self) -> bool {
        self.state_checksum == self.compute_checksum()
    }
}

impl Default for OrderSnapshot {
    fn default() -> Self {
        Self::new(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_snapshot_is_pending_with_service() {
        let snapshot = OrderSnapshot::new("order-1".to_string());
        assert_eq!(snapshot.status, OrderStatus::Pending);
        assert!(snapshot.include_service);
        assert_eq!(snapshot.service_rate, 10.0);
        assert!(snapshot.is_open());
        assert!(snapshot.verify_checksum());
    }

    #[test]
    fn test_checksum_detects_drift() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        snapshot.total = 10.0;
        assert!(!snapshot.verify_checksum());
        snapshot.update_checksum();
        assert!(snapshot.verify_checksum());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Paid.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Preparing.is_terminal());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&OrderStatus::Paid).unwrap(), "\"paid\"");
    }
}
