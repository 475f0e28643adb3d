//! UpdateNotes command handler

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType};

/// UpdateNotes action
#[derive(Debug, Clone)]
pub struct UpdateNotesAction {
    pub order_id: String,
    pub notes: Option<String>,
}

impl CommandHandler for UpdateNotesAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        ctx.load_open_snapshot(&self.order_id)?;

        // Blank notes clear the field
        let notes = self
            .notes
            .as_ref()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::NotesUpdated,
            EventPayload::NotesUpdated { notes },
        );

        Ok(vec![event])
    }
}
