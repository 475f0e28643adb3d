//! ServiceToggled event applier

use super::{finish, settle_if_paid};
use crate::orders::money;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// ServiceToggled applier
pub struct ServiceToggledApplier;

impl EventApplier for ServiceToggledApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ServiceToggled { include_service } = &event.payload {
            snapshot.include_service = *include_service;

            money::recalculate_totals(snapshot);
            settle_if_paid(snapshot, event);
            finish(snapshot, event);
        }
    }
}
