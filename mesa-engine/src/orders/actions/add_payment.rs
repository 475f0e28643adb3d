//! AddPayment command handler
//!
//! Records a payment against an open tab. Amounts must be positive and
//! may not exceed the remaining balance.

use crate::orders::money::{self, to_decimal, to_f64};
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, PaymentInput};

/// AddPayment action
#[derive(Debug, Clone)]
pub struct AddPaymentAction {
    pub order_id: String,
    pub payment: PaymentInput,
}

impl CommandHandler for AddPaymentAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Validate payment input (finite, positive, within bounds)
        money::validate_payment(&self.payment)?;

        // 2. Tab must be open
        let snapshot = ctx.load_open_snapshot(&self.order_id)?;

        // 3. Overpayment guard, exact to the cent
        let remaining = money::remaining_balance(&snapshot);
        if money::round_money(to_decimal(self.payment.amount)) > remaining {
            return Err(OrderError::Overpayment {
                amount: self.payment.amount,
                remaining: to_f64(remaining),
            });
        }

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id.clone(),
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::PaymentAdded,
            EventPayload::PaymentAdded {
                payment_id: shared::util::new_id(),
                amount: to_f64(to_decimal(self.payment.amount)),
                method: self.payment.method,
                notes: self.payment.notes.clone(),
            },
        );

        Ok(vec![event])
    }
}
