//! Order commands - requests to modify a tab

use super::snapshot::OrderStatus;
use super::types::PaymentInput;
use crate::models::ProductRef;
use serde::{Deserialize, Serialize};

/// Order command envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCommand {
    /// Client-generated command ID (idempotency key)
    pub command_id: String,
    pub operator_id: String,
    /// Operator name snapshot (for audit)
    pub operator_name: String,
    /// Client timestamp (Unix millis)
    pub timestamp: i64,
    pub payload: OrderCommandPayload,
}

impl OrderCommand {
    /// Create a command with a fresh command ID
    pub fn new(
        operator_id: impl Into<String>,
        operator_name: impl Into<String>,
        payload: OrderCommandPayload,
    ) -> Self {
        Self {
            command_id: uuid::Uuid::new_v4().to_string(),
            operator_id: operator_id.into(),
            operator_name: operator_name.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            payload,
        }
    }

    /// Order this command targets (None for OpenTable)
    pub fn order_id(&self) -> Option<&str> {
        match &self.payload {
            OrderCommandPayload::OpenTable { .. } => None,
            OrderCommandPayload::AddItem { order_id, .. }
            | OrderCommandPayload::RemoveItem { order_id, .. }
            | OrderCommandPayload::ToggleService { order_id }
            | OrderCommandPayload::AddPayment { order_id, .. }
            | OrderCommandPayload::UpdateStatus { order_id, .. }
            | OrderCommandPayload::UpdateNotes { order_id, .. } => Some(order_id),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Command payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderCommandPayload {
    /// Open a tab on an available table
    OpenTable {
        table_id: String,
        #[serde(default = "default_true")]
        include_service: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
    AddItem {
        order_id: String,
        product: ProductRef,
        quantity: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
    RemoveItem {
        order_id: String,
        item_id: String,
    },
    /// Flip whether the service charge applies
    ToggleService {
        order_id: String,
    },
    AddPayment {
        order_id: String,
        payment: PaymentInput,
    },
    /// Set the status directly (no transition guard)
    UpdateStatus {
        order_id: String,
        status: OrderStatus,
    },
    UpdateNotes {
        order_id: String,
        #[serde(default)]
        notes: Option<String>,
    },
}
