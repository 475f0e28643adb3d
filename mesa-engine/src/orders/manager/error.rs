use super::super::storage::StorageError;
use super::super::traits::OrderError;
use shared::order::{CommandError, CommandErrorCode};
use thiserror::Error;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

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

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Map a storage failure to a client-facing error code
fn classify_storage_error(e: &StorageError) -> CommandErrorCode {
    match e {
        StorageError::Serialization(_) => return CommandErrorCode::InternalError,
        StorageError::OrderNotFound(_) => return CommandErrorCode::OrderNotFound,
        _ => {}
    }

    // redb errors are classified by message
    let err_str = e.to_string().to_lowercase();

    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return CommandErrorCode::StorageFull;
    }

    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return CommandErrorCode::StorageCorrupted;
    }

    CommandErrorCode::SystemBusy
}

impl From<ManagerError> for CommandError {
    fn from(err: ManagerError) -> Self {
        let message = err.to_string();
        let code = match err {
            ManagerError::Storage(e) => {
                let code = classify_storage_error(&e);
                tracing::error!(error = %e, error_code = ?code, "Storage error occurred");
                code
            }
            ManagerError::OrderNotFound(_) => CommandErrorCode::OrderNotFound,
            ManagerError::OrderClosed(_) => CommandErrorCode::OrderClosed,
            ManagerError::ItemNotFound(_) => CommandErrorCode::ItemNotFound,
            ManagerError::InvalidQuantity(_) => CommandErrorCode::InvalidQuantity,
            ManagerError::ProductUnavailable(_) => CommandErrorCode::ProductUnavailable,
            ManagerError::InvalidAmount => CommandErrorCode::InvalidAmount,
            ManagerError::Overpayment { .. } => CommandErrorCode::Overpayment,
            ManagerError::TableNotFound(_) => CommandErrorCode::TableNotFound,
            ManagerError::TableOccupied(_) => CommandErrorCode::TableOccupied,
            ManagerError::InvalidOperation(_) => CommandErrorCode::InvalidOperation,
            ManagerError::Internal(_) => CommandErrorCode::InternalError,
        };
        CommandError::new(code, message)
    }
}

impl From<OrderError> for ManagerError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::OrderNotFound(id) => ManagerError::OrderNotFound(id),
            OrderError::OrderClosed(id) => ManagerError::OrderClosed(id),
            OrderError::ItemNotFound(id) => ManagerError::ItemNotFound(id),
            OrderError::InvalidQuantity(q) => ManagerError::InvalidQuantity(q),
            OrderError::ProductUnavailable(name) => ManagerError::ProductUnavailable(name),
            OrderError::InvalidAmount => ManagerError::InvalidAmount,
            OrderError::Overpayment { amount, remaining } => {
                ManagerError::Overpayment { amount, remaining }
            }
            OrderError::TableNotFound(id) => ManagerError::TableNotFound(id),
            OrderError::TableOccupied(msg) => ManagerError::TableOccupied(msg),
            OrderError::InvalidOperation(msg) => ManagerError::InvalidOperation(msg),
            OrderError::Storage(msg) => ManagerError::Internal(msg),
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
