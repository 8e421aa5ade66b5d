//! Billing calculator.
//!
//! A single pure function derives the invoice for a completed job. The
//! source UI duplicated this math across two dashboard modals with slightly
//! divergent rounding; consolidating it here is the point.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{BookingError, Result};
use crate::models::{Invoice, GST_RATE};

/// Conventional money rounding: two decimal places, midpoint away from zero.
fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the settlement for a job at the moment work is marked complete.
///
/// Deterministic: no clock, no randomness, identical inputs always yield an
/// identical invoice, so retries and test fixtures reproduce exactly. The
/// caller owns persisting the result onto the booking.
pub fn compute_invoice(
    service_price: Decimal,
    service_charge: Decimal,
    commission_rate: Decimal,
) -> Result<Invoice> {
    if service_price < Decimal::ZERO {
        return Err(BookingError::InvalidInvoiceInput(format!(
            "service price {service_price} is negative"
        )));
    }
    if service_charge < Decimal::ZERO {
        return Err(BookingError::InvalidInvoiceInput(format!(
            "service charge {service_charge} is negative"
        )));
    }
    if commission_rate < Decimal::ZERO || commission_rate > Decimal::ONE_HUNDRED {
        return Err(BookingError::InvalidInvoiceInput(format!(
            "commission rate {commission_rate} is outside 0-100"
        )));
    }

    let gst = round2((service_price + service_charge) * GST_RATE);
    let total_amount = round2(service_price + service_charge + gst);
    let commission = round2(total_amount * commission_rate / Decimal::ONE_HUNDRED);
    let provider_earning = round2(total_amount - commission);

    Ok(Invoice {
        service_price,
        service_charge,
        gst_rate: GST_RATE,
        gst,
        total_amount,
        commission_rate,
        commission,
        provider_earning,
    })
}
