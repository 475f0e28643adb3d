//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done in `Decimal`, then converted to `f64` (rounded to
//! cents, half away from zero) for storage and serialization. Because every
//! stored amount is cent-rounded, equality checks on stored values are exact.

use super::traits::OrderError;
use rust_decimal::prelude::*;
use shared::order::{OrderSnapshot, PaymentInput};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price (R$1,000,000)
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub(crate) const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed payment amount (R$1,000,000)
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), OrderError> {
    if !value.is_finite() {
        return Err(OrderError::InvalidOperation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a unit price snapshot before it lands on a tab
pub fn validate_price(price: f64) -> Result<(), OrderError> {
    require_finite(price, "price")?;
    if price < 0.0 {
        return Err(OrderError::InvalidOperation(format!(
            "price must be non-negative, got {}",
            price
        )));
    }
    if price > MAX_PRICE {
        return Err(OrderError::InvalidOperation(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, price
        )));
    }
    Ok(())
}

/// Validate a line quantity
pub fn validate_quantity(quantity: i32) -> Result<(), OrderError> {
    if quantity <= 0 {
        return Err(OrderError::InvalidQuantity(quantity));
    }
    if quantity > MAX_QUANTITY {
        return Err(OrderError::InvalidOperation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }
    Ok(())
}

/// Validate a PaymentInput before processing
///
/// The positivity check runs on the cent-rounded amount, the value that
/// actually lands on the tab.
pub fn validate_payment(payment: &PaymentInput) -> Result<(), OrderError> {
    require_finite(payment.amount, "payment amount")?;
    if round_money(to_decimal(payment.amount)) <= Decimal::ZERO {
        return Err(OrderError::InvalidAmount);
    }
    if payment.amount > MAX_PAYMENT_AMOUNT {
        return Err(OrderError::InvalidOperation(format!(
            "payment amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, payment.amount
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round a Decimal to cents
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// quantity × unit_price, rounded to cents
pub fn line_subtotal(quantity: i32, unit_price: f64) -> f64 {
    to_f64(Decimal::from(quantity) * to_decimal(unit_price))
}

/// Service charge for a subtotal at `rate_percent`, rounded to cents
pub fn service_charge(subtotal: Decimal, rate_percent: f64) -> Decimal {
    round_money(subtotal * to_decimal(rate_percent) / Decimal::ONE_HUNDRED)
}

/// Remaining balance of a snapshot as Decimal
pub fn remaining_balance(snapshot: &OrderSnapshot) -> Decimal {
    to_decimal(snapshot.total) - to_decimal(snapshot.total_paid)
}

/// Whether a snapshot's remaining balance is exactly zero
pub fn is_settled(snapshot: &OrderSnapshot) -> bool {
    round_money(remaining_balance(snapshot)).is_zero() && !snapshot.payments.is_empty()
}

/// Recalculate tab totals from items and payments
///
/// - subtotal = Σ unit_price × quantity
/// - service_charge = include_service ? subtotal × service_rate / 100 : 0
/// - total = subtotal + service_charge
/// - total_paid = Σ payments
/// - remaining_balance = total − total_paid
pub fn recalculate_totals(snapshot: &mut OrderSnapshot) {
    let mut subtotal = Decimal::ZERO;
    for item in &mut snapshot.items {
        let line = round_money(Decimal::from(item.quantity) * to_decimal(item.unit_price));
        item.subtotal = to_f64(line);
        subtotal += line;
    }

    let charge = if snapshot.include_service {
        service_charge(subtotal, snapshot.service_rate)
    } else {
        Decimal::ZERO
    };
    let total = subtotal + charge;

    let paid: Decimal = snapshot
        .payments
        .iter()
        .map(|p| to_decimal(p.amount))
        .sum();

    snapshot.subtotal = to_f64(subtotal);
    snapshot.service_charge = to_f64(charge);
    snapshot.total = to_f64(total);
    snapshot.total_paid = to_f64(paid);
    snapshot.remaining_balance = to_f64(total - paid);
}
