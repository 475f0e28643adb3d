//! StatusChanged event applier

use super::finish;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// StatusChanged applier
pub struct StatusChangedApplier;

impl EventApplier for StatusChangedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::StatusChanged { to, .. } = &event.payload {
            snapshot.status = *to;
            snapshot.closed_at = if to.is_terminal() {
                Some(event.timestamp)
            } else {
                None
            };

            finish(snapshot, event);
        }
    }
}
