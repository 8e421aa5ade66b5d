//! Booking lifecycle, billing, and reporting core for a home-services
//! marketplace.
//!
//! Three components share one entity model:
//!
//! - [`services::lifecycle`] — the status state machine: which transitions a
//!   booking may undergo, which actor may trigger them, and the atomic
//!   status-plus-invoice update when work is marked complete.
//! - [`services::billing`] — the pure invoice computation (price, add-on
//!   charge, GST, commission split), produced exactly once per booking.
//! - [`services::analytics`] — batch reductions of booking collections into
//!   dashboard totals, revenue trends, status distributions, rankings, and
//!   the admin commission report.
//!
//! Everything is synchronous and free of I/O. Persistence, identity, and
//! rendering are external collaborators: the store contract in
//! [`services::store`] spells out the optimistic write the lifecycle relies
//! on, and the acting principal is always an explicit [`models::Actor`]
//! argument rather than ambient session state.

pub mod error;
pub mod models;
pub mod services;

pub use error::{BookingError, Result};
pub use models::{
    Actor, Booking, BookingState, BookingStatus, BookingTotals, CommissionReport, CommissionRow,
    CustomerRef, DateRange, Invoice, RankedEntry, ReportKind, ReportTarget, RevenuePoint,
    ServiceRef, StatusCount, GST_RATE,
};
pub use services::{
    apply_transition, can_transition, commission_report, compute_invoice, revenue_trend,
    status_distribution, top_customers, top_services, totals, update_fields, BookingPatch,
    BookingStore, InMemoryBookingStore, PricingInput, TransitionInput,
};
