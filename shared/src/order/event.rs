//! Order events - immutable facts recorded after command processing

use super::snapshot::OrderStatus;
use super::types::{OrderItem, PaymentMethod};
use serde::{Deserialize, Serialize};

/// Order event - immutable audit record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderEvent {
    /// Event unique ID
    pub event_id: String,
    /// Global sequence number (ordering and replay)
    pub sequence: u64,
    /// Order this event belongs to
    pub order_id: String,
    /// Server timestamp (Unix millis), authoritative for state evolution
    pub timestamp: i64,
    /// Client timestamp preserved from the command, for audit only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_timestamp: Option<i64>,
    pub operator_id: String,
    pub operator_name: String,
    /// Command that triggered this event
    pub command_id: String,
    pub event_type: OrderEventType,
    pub payload: EventPayload,
}

/// Event type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventType {
    // Lifecycle
    TableOpened,
    StatusChanged,

    // Items
    ItemAdded,
    ItemRemoved,

    // Pricing
    ServiceToggled,

    // Payments
    PaymentAdded,

    // Other
    NotesUpdated,
}

impl std::fmt::Display for OrderEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderEventType::TableOpened => write!(f, "TABLE_OPENED"),
            OrderEventType::StatusChanged => write!(f, "STATUS_CHANGED"),
            OrderEventType::ItemAdded => write!(f, "ITEM_ADDED"),
            OrderEventType::ItemRemoved => write!(f, "ITEM_REMOVED"),
            OrderEventType::ServiceToggled => write!(f, "SERVICE_TOGGLED"),
            OrderEventType::PaymentAdded => write!(f, "PAYMENT_ADDED"),
            OrderEventType::NotesUpdated => write!(f, "NOTES_UPDATED"),
        }
    }
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    // ========== Lifecycle ==========
    TableOpened {
        table_id: String,
        table_number: i32,
        include_service: bool,
        /// Service rate (percent) frozen for the life of the tab
        service_rate: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },

    StatusChanged {
        from: OrderStatus,
        to: OrderStatus,
    },

    // ========== Items ==========
    ItemAdded {
        item: OrderItem,
    },

    ItemRemoved {
        item_id: String,
        /// Name snapshot (for audit)
        product_name: String,
    },

    // ========== Pricing ==========
    ServiceToggled {
        include_service: bool,
    },

    // ========== Payments ==========
    PaymentAdded {
        payment_id: String,
        amount: f64,
        method: PaymentMethod,
        #[serde(skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },

    // ========== Other ==========
    NotesUpdated {
        #[serde(skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
}

impl EventPayload {
    /// Event type matching this payload
    pub fn event_type(&self) -> OrderEventType {
        match self {
            EventPayload::TableOpened { .. } => OrderEventType::TableOpened,
            EventPayload::StatusChanged { .. } => OrderEventType::StatusChanged,
            EventPayload::ItemAdded { .. } => OrderEventType::ItemAdded,
            EventPayload::ItemRemoved { .. } => OrderEventType::ItemRemoved,
            EventPayload::ServiceToggled { .. } => OrderEventType::ServiceToggled,
            EventPayload::PaymentAdded { .. } => OrderEventType::PaymentAdded,
            EventPayload::NotesUpdated { .. } => OrderEventType::NotesUpdated,
        }
    }
}

impl OrderEvent {
    /// Create a new event
    ///
    /// The server timestamp is always taken here; `client_timestamp` is kept
    /// for audit and may differ due to clock skew.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sequence: u64,
        order_id: String,
        operator_id: String,
        operator_name: String,
        command_id: String,
        client_timestamp: Option<i64>,
        event_type: OrderEventType,
        payload: EventPayload,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            sequence,
            order_id,
            timestamp: chrono::Utc::now().timestamp_millis(),
            client_timestamp,
            operator_id,
            operator_name,
            command_id,
            event_type,
            payload,
        }
    }
}
