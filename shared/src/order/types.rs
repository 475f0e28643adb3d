//! Shared types for the tab ledger

use serde::{Deserialize, Serialize};

// ============================================================================
// Items
// ============================================================================

/// Line item of a tab
///
/// Name and unit price are denormalized from the product at add time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Item ID (assigned when added)
    pub id: String,
    pub product_id: String,
    /// Product name snapshot
    pub product_name: String,
    pub quantity: i32,
    /// Unit price snapshot
    pub unit_price: f64,
    /// quantity × unit_price
    pub subtotal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================================================
// Payments
// ============================================================================

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    CreditCard,
    DebitCard,
    Pix,
    Voucher,
    Other,
}

/// Payment input for recording a payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    pub amount: f64,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PaymentInput {
    pub fn new(amount: f64, method: PaymentMethod) -> Self {
        Self {
            amount,
            method,
            notes: None,
        }
    }
}

/// Payment record in snapshot (append-only)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub payment_id: String,
    pub amount: f64,
    pub method: PaymentMethod,
    /// Unix millis
    pub paid_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================================================
// Command response
// ============================================================================

/// Command response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// The command ID this responds to
    pub command_id: String,
    /// Whether the command succeeded
    pub success: bool,
    /// New order ID (only for OpenTable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Error details if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl CommandResponse {
    pub fn success(command_id: String, order_id: Option<String>) -> Self {
        Self {
            command_id,
            success: true,
            order_id,
            error: None,
        }
    }

    pub fn error(command_id: String, error: CommandError) -> Self {
        Self {
            command_id,
            success: false,
            order_id: None,
            error: Some(error),
        }
    }

    pub fn duplicate(command_id: String) -> Self {
        Self {
            command_id,
            success: true,
            order_id: None,
            error: None,
        }
    }

    /// Error code, if the command failed
    pub fn error_code(&self) -> Option<CommandErrorCode> {
        self.error.as_ref().map(|e| e.code)
    }
}

/// Command error reported back to the caller
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[error("{code:?}: {message}")]
pub struct CommandError {
    pub code: CommandErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Command error codes (the presentation layer localizes them)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandErrorCode {
    OrderNotFound,
    OrderClosed,
    ItemNotFound,
    InvalidQuantity,
    ProductUnavailable,
    InvalidAmount,
    Overpayment,
    TableNotFound,
    TableOccupied,
    InvalidOperation,
    InternalError,
    // Storage
    StorageFull,
    StorageCorrupted,
    SystemBusy,
}
