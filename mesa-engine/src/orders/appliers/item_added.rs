//! ItemAdded event applier

use super::finish;
use crate::orders::money;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// ItemAdded applier
pub struct ItemAddedApplier;

impl EventApplier for ItemAddedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ItemAdded { item } = &event.payload {
            snapshot.items.push(item.clone());

            money::recalculate_totals(snapshot);
            finish(snapshot, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::appliers::test_event;
    use shared::order::OrderItem;

    fn item(id: &str, unit_price: f64, quantity: i32) -> OrderItem {
        OrderItem {
            id: id.to_string(),
            product_id: "p1".to_string(),
            product_name: "Picanha".to_string(),
            quantity,
            unit_price,
            subtotal: money::line_subtotal(quantity, unit_price),
            notes: None,
        }
    }

    #[test]
    fn test_item_added_recomputes_totals() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());

        let event = test_event("order-1", 2, EventPayload::ItemAdded { item: item("i1", 25.90, 2) });
        ItemAddedApplier.apply(&mut snapshot, &event);

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.subtotal, 51.8);
        assert_eq!(snapshot.service_charge, 5.18);
        assert_eq!(snapshot.total, 56.98);
        assert_eq!(snapshot.remaining_balance, 56.98);
        assert_eq!(snapshot.last_sequence, 2);
    }

    #[test]
    fn test_same_product_added_twice_keeps_two_lines() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        ItemAddedApplier.apply(
            &mut snapshot,
            &test_event("order-1", 1, EventPayload::ItemAdded { item: item("i1", 10.0, 1) }),
        );
        ItemAddedApplier.apply(
            &mut snapshot,
            &test_event("order-1", 2, EventPayload::ItemAdded { item: item("i2", 10.0, 1) }),
        );

        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.subtotal, 20.0);
    }
}
