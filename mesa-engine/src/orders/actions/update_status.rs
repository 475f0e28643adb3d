//! UpdateStatus command handler
//!
//! Sets the tab status directly. Any status may follow any other; table
//! occupancy is reconciled by the manager after the event is applied.

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus};

/// UpdateStatus action
#[derive(Debug, Clone)]
pub struct UpdateStatusAction {
    pub order_id: String,
    pub status: OrderStatus,
}

impl CommandHandler for UpdateStatusAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        let snapshot = ctx.load_snapshot(&self.order_id)?;

        // Same status: nothing to record
        if snapshot.status == self.status {
            return Ok(vec![]);
        }

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::StatusChanged,
            EventPayload::StatusChanged {
                from: snapshot.status,
                to: self.status,
            },
        );

        Ok(vec![event])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::actions::test_support::{metadata, seed_tab};
    use crate::orders::storage::OrderStorage;

    fn action(status: OrderStatus) -> UpdateStatusAction {
        UpdateStatusAction {
            order_id: "order-1".to_string(),
            status,
        }
    }

    #[test]
    fn test_any_transition_is_allowed() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let mut snapshot = seed_tab(&storage, "order-1", vec![]);
        snapshot.status = OrderStatus::Cancelled;

        let txn = storage.begin_write().unwrap();
        storage.store_snapshot(&txn, &snapshot).unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, 0);

        let events = action(OrderStatus::Preparing).execute(&mut ctx, &metadata()).unwrap();
        assert_eq!(
            events[0].payload,
            EventPayload::StatusChanged {
                from: OrderStatus::Cancelled,
                to: OrderStatus::Preparing
            }
        );
    }

    #[test]
    fn test_same_status_emits_nothing() {
        let storage = OrderStorage::open_in_memory().unwrap();
        seed_tab(&storage, "order-1", vec![]);

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, 0);
        let events = action(OrderStatus::Pending).execute(&mut ctx, &metadata()).unwrap();
        assert!(events.is_empty());
        assert_eq!(ctx.current_sequence(), 0);
    }
}
