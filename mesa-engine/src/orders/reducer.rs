//! Snapshot replay
//!
//! Folds an event stream through the appliers. Replaying the stored events
//! of a tab must reproduce the stored snapshot exactly.

use super::appliers::apply_event;
use shared::order::{OrderEvent, OrderSnapshot};

/// Rebuild a snapshot from its events, in sequence order
///
/// Returns `None` for an empty stream.
pub fn rebuild_snapshot(events: &[OrderEvent]) -> Option<OrderSnapshot> {
    let first = events.first()?;

    let mut ordered: Vec<&OrderEvent> = events.iter().collect();
    ordered.sort_by_key(|e| e.sequence);

    let mut snapshot = OrderSnapshot::new(first.order_id.clone());
    for event in ordered {
        apply_event(&mut snapshot, event);
    }
    Some(snapshot)
}
