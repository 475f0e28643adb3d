//! ItemRemoved event applier

use super::{finish, settle_if_paid};
use crate::orders::money;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// ItemRemoved applier
pub struct ItemRemovedApplier;

impl EventApplier for ItemRemovedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ItemRemoved { item_id, .. } = &event.payload {
            snapshot.items.retain(|i| &i.id != item_id);

            money::recalculate_totals(snapshot);
            settle_if_paid(snapshot, event);
            finish(snapshot, event);
        }
    }
}
