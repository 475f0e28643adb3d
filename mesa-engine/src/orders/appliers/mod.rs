//! Event applier implementations
//!
//! Each applier implements the `EventApplier` trait and handles
//! one specific event type. Appliers are PURE functions.

use enum_dispatch::enum_dispatch;

use crate::orders::money;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderStatus};

mod item_added;
mod item_removed;
mod notes_updated;
mod payment_added;
mod service_toggled;
mod status_changed;
mod table_opened;

pub use item_added::ItemAddedApplier;
pub use item_removed::ItemRemovedApplier;
pub use notes_updated::NotesUpdatedApplier;
pub use payment_added::PaymentAddedApplier;
pub use service_toggled::ServiceToggledApplier;
pub use status_changed::StatusChangedApplier;
pub use table_opened::TableOpenedApplier;

/// EventAction enum - dispatches to concrete applier implementations
///
/// Uses enum_dispatch for zero-cost static dispatch.
#[enum_dispatch(EventApplier)]
pub enum EventAction {
    TableOpened(TableOpenedApplier),
    StatusChanged(StatusChangedApplier),
    ItemAdded(ItemAddedApplier),
    ItemRemoved(ItemRemovedApplier),
    ServiceToggled(ServiceToggledApplier),
    PaymentAdded(PaymentAddedApplier),
    NotesUpdated(NotesUpdatedApplier),
}

/// Convert OrderEvent reference to EventAction
///
/// This is the ONLY place with a match on EventPayload.
impl From<&OrderEvent> for EventAction {
    fn from(event: &OrderEvent) -> Self {
        match &event.payload {
            EventPayload::TableOpened { .. } => EventAction::TableOpened(TableOpenedApplier),
            EventPayload::StatusChanged { .. } => EventAction::StatusChanged(StatusChangedApplier),
            EventPayload::ItemAdded { .. } => EventAction::ItemAdded(ItemAddedApplier),
            EventPayload::ItemRemoved { .. } => EventAction::ItemRemoved(ItemRemovedApplier),
            EventPayload::ServiceToggled { .. } => {
                EventAction::ServiceToggled(ServiceToggledApplier)
            }
            EventPayload::PaymentAdded { .. } => EventAction::PaymentAdded(PaymentAddedApplier),
            EventPayload::NotesUpdated { .. } => EventAction::NotesUpdated(NotesUpdatedApplier),
        }
    }
}

/// Apply a single event to a snapshot
pub fn apply_event(snapshot: &mut OrderSnapshot, event: &OrderEvent) {
    let action = EventAction::from(event);
    action.apply(snapshot, event);
}

/// Close an open tab whose remaining balance is exactly zero
///
/// Runs after every event that moves `total` or `total_paid`.
fn settle_if_paid(snapshot: &mut OrderSnapshot, event: &OrderEvent) {
    if snapshot.is_open() && money::is_settled(snapshot) {
        snapshot.status = OrderStatus::Paid;
        snapshot.closed_at = Some(event.timestamp);
    }
}

/// Bookkeeping shared by every applier: sequence, timestamp, checksum
fn finish(snapshot: &mut OrderSnapshot, event: &OrderEvent) {
    snapshot.last_sequence = event.sequence;
    snapshot.updated_at = event.timestamp;
    snapshot.update_checksum();
}

#[cfg(test)]
pub(crate) fn test_event(order_id: &str, sequence: u64, payload: EventPayload) -> OrderEvent {
    let event_type = payload.event_type();
    OrderEvent::new(
        sequence,
        order_id.to_string(),
        "user-1".to_string(),
        "Test User".to_string(),
        format!("cmd-{sequence}"),
        Some(1234567890),
        event_type,
        payload,
    )
}
