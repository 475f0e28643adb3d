//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and handles
//! one specific command type.

use crate::orders::money;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{
    OrderCommand, OrderCommandPayload, OrderEvent, OrderSnapshot, DEFAULT_SERVICE_RATE,
};

mod add_item;
mod add_payment;
mod open_table;
mod remove_item;
mod toggle_service;
mod update_notes;
mod update_status;

pub use add_item::AddItemAction;
pub use add_payment::AddPaymentAction;
pub use open_table::OpenTableAction;
pub use remove_item::RemoveItemAction;
pub use toggle_service::ToggleServiceAction;
pub use update_notes::UpdateNotesAction;
pub use update_status::UpdateStatusAction;

/// CommandAction enum - dispatches to concrete action implementations
pub enum CommandAction {
    OpenTable(OpenTableAction),
    AddItem(AddItemAction),
    RemoveItem(RemoveItemAction),
    ToggleService(ToggleServiceAction),
    AddPayment(AddPaymentAction),
    UpdateStatus(UpdateStatusAction),
    UpdateNotes(UpdateNotesAction),
}

/// Manual implementation of CommandHandler for CommandAction
impl CommandHandler for CommandAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        match self {
            CommandAction::OpenTable(action) => action.execute(ctx, metadata),
            CommandAction::AddItem(action) => action.execute(ctx, metadata),
            CommandAction::RemoveItem(action) => action.execute(ctx, metadata),
            CommandAction::ToggleService(action) => action.execute(ctx, metadata),
            CommandAction::AddPayment(action) => action.execute(ctx, metadata),
            CommandAction::UpdateStatus(action) => action.execute(ctx, metadata),
            CommandAction::UpdateNotes(action) => action.execute(ctx, metadata),
        }
    }
}

impl CommandAction {
    /// Build the action for a command, freezing `service_rate` into new tabs
    pub fn from_command(cmd: &OrderCommand, service_rate: f64) -> Self {
        match &cmd.payload {
            OrderCommandPayload::OpenTable {
                table_id,
                include_service,
                notes,
            } => CommandAction::OpenTable(OpenTableAction {
                table_id: table_id.clone(),
                include_service: *include_service,
                service_rate,
                notes: notes.clone(),
            }),
            OrderCommandPayload::AddItem {
                order_id,
                product,
                quantity,
                notes,
            } => CommandAction::AddItem(AddItemAction {
                order_id: order_id.clone(),
                product: product.clone(),
                quantity: *quantity,
                notes: notes.clone(),
            }),
            OrderCommandPayload::RemoveItem { order_id, item_id } => {
                CommandAction::RemoveItem(RemoveItemAction {
                    order_id: order_id.clone(),
                    item_id: item_id.clone(),
                })
            }
            OrderCommandPayload::ToggleService { order_id } => {
                CommandAction::ToggleService(ToggleServiceAction {
                    order_id: order_id.clone(),
                })
            }
            OrderCommandPayload::AddPayment { order_id, payment } => {
                CommandAction::AddPayment(AddPaymentAction {
                    order_id: order_id.clone(),
                    payment: payment.clone(),
                })
            }
            OrderCommandPayload::UpdateStatus { order_id, status } => {
                CommandAction::UpdateStatus(UpdateStatusAction {
                    order_id: order_id.clone(),
                    status: *status,
                })
            }
            OrderCommandPayload::UpdateNotes { order_id, notes } => {
                CommandAction::UpdateNotes(UpdateNotesAction {
                    order_id: order_id.clone(),
                    notes: notes.clone(),
                })
            }
        }
    }
}

/// Reject a change that would push the tab total below what was already paid
///
/// `projected` must already have its totals recalculated.
fn ensure_covers_paid(projected: &OrderSnapshot) -> Result<(), OrderError> {
    if money::to_decimal(projected.total) < money::to_decimal(projected.total_paid) {
        return Err(OrderError::InvalidOperation(format!(
            "new total ({:.2}) would be below amount already paid ({:.2})",
            projected.total, projected.total_paid
        )));
    }
    Ok(())
}

/// Convert OrderCommand reference to CommandAction at the default service rate
impl From<&OrderCommand> for CommandAction {
    fn from(cmd: &OrderCommand) -> Self {
        CommandAction::from_command(cmd, DEFAULT_SERVICE_RATE)
    }
}
