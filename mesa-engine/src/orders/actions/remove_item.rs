//! RemoveItem command handler

use super::ensure_covers_paid;
use crate::orders::money;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType};

/// RemoveItem action
#[derive(Debug, Clone)]
pub struct RemoveItemAction {
    pub order_id: String,
    pub item_id: String,
}

impl CommandHandler for RemoveItemAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        let snapshot = ctx.load_open_snapshot(&self.order_id)?;

        let item = snapshot
            .find_item(&self.item_id)
            .ok_or_else(|| OrderError::ItemNotFound(self.item_id.clone()))?;
        let product_name = item.product_name.clone();

        let mut projected = snapshot.clone();
        projected.items.retain(|i| i.id != self.item_id);
        money::recalculate_totals(&mut projected);
        ensure_covers_paid(&projected)?;

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::ItemRemoved,
            EventPayload::ItemRemoved {
                item_id: self.item_id.clone(),
                product_name,
            },
        );

        Ok(vec![event])
    }
}
