//! Invoice model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GST applied on top of service price plus service charge: 18%.
pub const GST_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Financial settlement attached to a completed booking.
///
/// Created exactly once by the billing calculator when work is marked
/// complete, never mutated afterward. All fields are rounded to two decimal
/// places at computation time; decimal arithmetic keeps downstream
/// aggregation exact. Carries no timestamp so that computation stays
/// deterministic; the booking's `updated_at` records when it was issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub service_price: Decimal,
    /// Add-on/visit fee on top of the catalog price.
    pub service_charge: Decimal,
    pub gst_rate: Decimal,
    pub gst: Decimal,
    pub total_amount: Decimal,
    /// Platform cut as a percentage, copied from the service at invoice time.
    pub commission_rate: Decimal,
    pub commission: Decimal,
    pub provider_earning: Decimal,
}
