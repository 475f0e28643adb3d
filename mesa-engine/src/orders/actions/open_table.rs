//! OpenTable command handler
//!
//! Opens a new tab on an available dining table.

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType};

/// OpenTable action
#[derive(Debug, Clone)]
pub struct OpenTableAction {
    pub table_id: String,
    pub include_service: bool,
    /// Service rate (percent) frozen into the tab
    pub service_rate: f64,
    pub notes: Option<String>,
}

impl CommandHandler for OpenTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Table must exist and be free
        let table = ctx.load_table(&self.table_id)?;
        if !table.is_available() {
            return Err(OrderError::TableOccupied(table.display_name()));
        }

        if !self.service_rate.is_finite() || !(0.0..=100.0).contains(&self.service_rate) {
            return Err(OrderError::InvalidOperation(format!(
                "service rate must be between 0 and 100, got {}",
                self.service_rate
            )));
        }

        // 2. Server-generated order ID
        let order_id = shared::util::new_id();
        let seq = ctx.next_sequence();

        let event = OrderEvent::new(
            seq,
            order_id,
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::TableOpened,
            EventPayload::TableOpened {
                table_id: table.id.clone(),
                table_number: table.number,
                include_service: self.include_service,
                service_rate: self.service_rate,
                notes: self.notes.clone(),
            },
        );

        Ok(vec![event])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::actions::test_support::metadata;
    use crate::orders::storage::OrderStorage;
    use shared::models::{DiningTable, TableStatus};

    fn action(table_id: &str) -> OpenTableAction {
        OpenTableAction {
            table_id: table_id.to_string(),
            include_service: true,
            service_rate: 10.0,
            notes: None,
        }
    }

    #[test]
    fn test_open_table_emits_table_opened() {
        let storage = OrderStorage::open_in_memory().unwrap();
        storage.upsert_table(&DiningTable::new("T1", 4)).unwrap();

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, 0);
        let events = action("T1").execute(&mut ctx, &metadata()).unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.sequence, 1);
        assert_eq!(event.event_type, OrderEventType::TableOpened);
        assert!(!event.order_id.is_empty());
        match &event.payload {
            EventPayload::TableOpened {
                table_id,
                table_number,
                service_rate,
                ..
            } => {
                assert_eq!(table_id, "T1");
                assert_eq!(*table_number, 4);
                assert_eq!(*service_rate, 10.0);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_open_missing_table_fails() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, 0);

        let result = action("nope").execute(&mut ctx, &metadata());
        assert_eq!(result, Err(OrderError::TableNotFound("nope".to_string())));
    }

    #[test]
    fn test_open_occupied_table_fails() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let mut table = DiningTable::new("T1", 1);
        table.status = TableStatus::Occupied;
        storage.upsert_table(&table).unwrap();

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, 0);
        let result = action("T1").execute(&mut ctx, &metadata());
        assert!(matches!(result, Err(OrderError::TableOccupied(_))));
        assert_eq!(ctx.current_sequence(), 0);
    }
}
