//! TableOpened event applier
//!
//! Creates the initial tab state.

use super::finish;
use crate::orders::money;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderStatus};

/// TableOpened applier
pub struct TableOpenedApplier;

impl EventApplier for TableOpenedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::TableOpened {
            table_id,
            table_number,
            include_service,
            service_rate,
            notes,
        } = &event.payload
        {
            // order_id comes from the event so replay works from an empty snapshot
            snapshot.order_id = event.order_id.clone();
            snapshot.table_id = table_id.clone();
            snapshot.table_number = *table_number;
            snapshot.include_service = *include_service;
            snapshot.service_rate = *service_rate;
            snapshot.notes = notes.clone();
            snapshot.status = OrderStatus::Pending;
            snapshot.created_at = event.timestamp;
            snapshot.closed_at = None;

            money::recalculate_totals(snapshot);
            finish(snapshot, event);
        }
    }
}
