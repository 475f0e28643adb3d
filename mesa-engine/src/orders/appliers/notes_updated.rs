//! NotesUpdated event applier

use super::finish;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// NotesUpdated applier
pub struct NotesUpdatedApplier;

impl EventApplier for NotesUpdatedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::NotesUpdated { notes } = &event.payload {
            snapshot.notes = notes.clone();
            finish(snapshot, event);
        }
    }
}
