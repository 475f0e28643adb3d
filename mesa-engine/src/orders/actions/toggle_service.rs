//! ToggleService command handler
//!
//! Flips whether the service charge applies to the tab.

use super::ensure_covers_paid;
use crate::orders::money;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType};

/// ToggleService action
#[derive(Debug, Clone)]
pub struct ToggleServiceAction {
    pub order_id: String,
}

impl CommandHandler for ToggleServiceAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        let snapshot = ctx.load_open_snapshot(&self.order_id)?;
        let include_service = !snapshot.include_service;

        if !include_service {
            let mut projected = snapshot.clone();
            projected.include_service = false;
            money::recalculate_totals(&mut projected);
            ensure_covers_paid(&projected)?;
        }

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::ServiceToggled,
            EventPayload::ServiceToggled { include_service },
        );

        Ok(vec![event])
    }
}
