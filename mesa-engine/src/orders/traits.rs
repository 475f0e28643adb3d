//! Command handler and event applier seams
//!
//! - `CommandHandler`: validates a command against current state and
//!   produces events. Never mutates snapshots.
//! - `EventApplier`: pure function applying one event to a snapshot.

use super::storage::{OrderStorage, StorageError};
use enum_dispatch::enum_dispatch;
use redb::WriteTransaction;
use shared::models::DiningTable;
use shared::order::{OrderEvent, OrderSnapshot};
use thiserror::Error;

/// Errors raised while validating a command
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order is closed: {0}")]
    OrderClosed(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i32),

    #[error("Product unavailable: {0}")]
    ProductUnavailable(String),

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Payment amount ({amount:.2}) exceeds remaining balance ({remaining:.2})")]
    Overpayment { amount: f64, remaining: f64 },

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table is already occupied: {0}")]
    TableOccupied(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for OrderError {
    fn from(err: StorageError) -> Self {
        OrderError::Storage(err.to_string())
    }
}

/// Metadata copied from the command envelope into every event
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub command_id: String,
    pub operator_id: String,
    pub operator_name: String,
    /// Client timestamp (Unix millis)
    pub timestamp: i64,
}

/// Execution context for one command inside a write transaction
pub struct CommandContext<'a> {
    txn: &'a WriteTransaction,
    storage: &'a OrderStorage,
    current_sequence: u64,
}

impl<'a> CommandContext<'a> {
    pub fn new(txn: &'a WriteTransaction, storage: &'a OrderStorage, current_sequence: u64) -> Self {
        Self {
            txn,
            storage,
            current_sequence,
        }
    }

    /// Allocate the next global sequence number
    pub fn next_sequence(&mut self) -> u64 {
        self.current_sequence += 1;
        self.current_sequence
    }

    /// Last allocated sequence number
    pub fn current_sequence(&self) -> u64 {
        self.current_sequence
    }

    /// Load an existing snapshot, failing with `OrderNotFound`
    pub fn load_snapshot(&self, order_id: &str) -> Result<OrderSnapshot, OrderError> {
        self.storage
            .get_snapshot_txn(self.txn, order_id)?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// Load an open (non-terminal) snapshot, failing with `OrderClosed`
    pub fn load_open_snapshot(&self, order_id: &str) -> Result<OrderSnapshot, OrderError> {
        let snapshot = self.load_snapshot(order_id)?;
        if !snapshot.is_open() {
            return Err(OrderError::OrderClosed(order_id.to_string()));
        }
        Ok(snapshot)
    }

    /// Load a dining table, failing with `TableNotFound`
    pub fn load_table(&self, table_id: &str) -> Result<DiningTable, OrderError> {
        self.storage
            .get_table_txn(self.txn, table_id)?
            .ok_or_else(|| OrderError::TableNotFound(table_id.to_string()))
    }
}

/// Command handler: (current state, command) -> events
pub trait CommandHandler {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError>;
}

/// Event applier: pure (snapshot, event) -> snapshot mutation
#[enum_dispatch]
pub trait EventApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent);
}
