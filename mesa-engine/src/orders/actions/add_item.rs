//! AddItem command handler
//!
//! Adds a product line to an open tab. Name and price are taken from the
//! product snapshot carried by the command.

use crate::orders::money;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::models::ProductRef;
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderItem};

/// AddItem action
#[derive(Debug, Clone)]
pub struct AddItemAction {
    pub order_id: String,
    pub product: ProductRef,
    pub quantity: i32,
    pub notes: Option<String>,
}

impl CommandHandler for AddItemAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        money::validate_quantity(self.quantity)?;
        money::validate_price(self.product.price)?;

        let _snapshot = ctx.load_open_snapshot(&self.order_id)?;

        if !self.product.is_available {
            return Err(OrderError::ProductUnavailable(self.product.name.clone()));
        }

        let item = OrderItem {
            id: shared::util::new_id(),
            product_id: self.product.id.clone(),
            product_name: self.product.name.clone(),
            quantity: self.quantity,
            unit_price: self.product.price,
            subtotal: money::line_subtotal(self.quantity, self.product.price),
            notes: self.notes.clone(),
        };

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::ItemAdded,
            EventPayload::ItemAdded { item },
        );

        Ok(vec![event])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::actions::test_support::{metadata, seed_tab};
    use crate::orders::storage::OrderStorage;
    use shared::order::OrderStatus;

    fn action(product: ProductRef, quantity: i32) -> AddItemAction {
        AddItemAction {
            order_id: "order-1".to_string(),
            product,
            quantity,
            notes: Some("sem cebola".to_string()),
        }
    }

    #[test]
    fn test_add_item_snapshots_product() {
        let storage = OrderStorage::open_in_memory().unwrap();
        seed_tab(&storage, "order-1", vec![]);

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, 5);
        let events = action(ProductRef::new("p1", "Moqueca", 25.90), 2)
            .execute(&mut ctx, &metadata())
            .unwrap();

        assert_eq!(events[0].sequence, 6);
        match &events[0].payload {
            EventPayload::ItemAdded { item } => {
                assert_eq!(item.product_id, "p1");
                assert_eq!(item.product_name, "Moqueca");
                assert_eq!(item.unit_price, 25.90);
                assert_eq!(item.subtotal, 51.8);
                assert_eq!(item.notes.as_deref(), Some("sem cebola"));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_add_item_rejects_zero_quantity() {
        let storage = OrderStorage::open_in_memory().unwrap();
        seed_tab(&storage, "order-1", vec![]);

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, 0);
        let result = action(ProductRef::new("p1", "Moqueca", 25.90), 0).execute(&mut ctx, &metadata());
        assert_eq!(result, Err(OrderError::InvalidQuantity(0)));
    }

    #[test]
    fn test_add_item_rejects_unavailable_product() {
        let storage = OrderStorage::open_in_memory().unwrap();
        seed_tab(&storage, "order-1", vec![]);

        let mut product = ProductRef::new("p1", "Lagosta", 120.0);
        product.is_available = false;

        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, 0);
        let result = action(product, 1).execute(&mut ctx, &metadata());
        assert_eq!(result, Err(OrderError::ProductUnavailable("Lagosta".to_string())));
    }

    #[test]
    fn test_add_item_to_missing_or_closed_tab() {
        let storage = OrderStorage::open_in_memory().unwrap();
        {
            let txn = storage.begin_write().unwrap();
            let mut ctx = CommandContext::new(&txn, &storage, 0);
            let result = action(ProductRef::new("p1", "X", 1.0), 1).execute(&mut ctx, &metadata());
            assert_eq!(result, Err(OrderError::OrderNotFound("order-1".to_string())));
        }

        let mut snapshot = seed_tab(&storage, "order-1", vec![]);
        snapshot.status = OrderStatus::Cancelled;
        let txn = storage.begin_write().unwrap();
        storage.store_snapshot(&txn, &snapshot).unwrap();
        let mut ctx = CommandContext::new(&txn, &storage, 0);
        let result = action(ProductRef::new("p1", "X", 1.0), 1).execute(&mut ctx, &metadata());
        assert_eq!(result, Err(OrderError::OrderClosed("order-1".to_string())));
    }
}
