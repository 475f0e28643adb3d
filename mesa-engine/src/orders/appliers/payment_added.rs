//! PaymentAdded event applier
//!
//! Appends the payment and settles the tab when the remaining balance
//! reaches exactly zero.

use super::{finish, settle_if_paid};
use crate::orders::money;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, PaymentRecord};

/// PaymentAdded applier
pub struct PaymentAddedApplier;

impl EventApplier for PaymentAddedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::PaymentAdded {
            payment_id,
            amount,
            method,
            notes,
        } = &event.payload
        {
            snapshot.payments.push(PaymentRecord {
                payment_id: payment_id.clone(),
                amount: *amount,
                method: *method,
                paid_at: event.timestamp,
                notes: notes.clone(),
            });

            money::recalculate_totals(snapshot);
            settle_if_paid(snapshot, event);
            finish(snapshot, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::appliers::test_event;
    use shared::order::{OrderItem, OrderStatus, PaymentMethod};

    fn tab_with_total() -> OrderSnapshot {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        snapshot.items.push(OrderItem {
            id: "i1".to_string(),
            product_id: "p1".to_string(),
            product_name: "Moqueca".to_string(),
            quantity: 2,
            unit_price: 25.90,
            subtotal: 51.8,
            notes: None,
        });
        money::recalculate_totals(&mut snapshot);
        snapshot
    }

    fn payment_event(seq: u64, amount: f64) -> OrderEvent {
        test_event(
            "order-1",
            seq,
            EventPayload::PaymentAdded {
                payment_id: format!("pay-{seq}"),
                amount,
                method: PaymentMethod::CreditCard,
                notes: None,
            },
        )
    }

    #[test]
    fn test_partial_payment_keeps_tab_open() {
        let mut snapshot = tab_with_total();
        PaymentAddedApplier.apply(&mut snapshot, &payment_event(2, 30.0));

        assert_eq!(snapshot.payments.len(), 1);
        assert_eq!(snapshot.payments[0].method, PaymentMethod::CreditCard);
        assert_eq!(snapshot.total_paid, 30.0);
        assert_eq!(snapshot.remaining_balance, 26.98);
        assert_eq!(snapshot.status, OrderStatus::Pending);
        assert!(snapshot.closed_at.is_none());
    }

    #[test]
    fn test_final_payment_settles_tab() {
        let mut snapshot = tab_with_total();
        PaymentAddedApplier.apply(&mut snapshot, &payment_event(2, 30.0));
        let last = payment_event(3, 26.98);
        PaymentAddedApplier.apply(&mut snapshot, &last);

        assert_eq!(snapshot.remaining_balance, 0.0);
        assert_eq!(snapshot.total_paid, 56.98);
        assert_eq!(snapshot.status, OrderStatus::Paid);
        assert_eq!(snapshot.closed_at, Some(last.timestamp));
        assert_eq!(snapshot.payments[1].paid_at, last.timestamp);
    }
}
