//! Behavior: lifecycle state machine, billing calculator, analytics
//! aggregator, and the persistence contract.

pub mod analytics;
pub mod billing;
pub mod lifecycle;
pub mod store;

pub use analytics::{
    commission_report, revenue_trend, status_distribution, top_customers, top_n_by_count,
    top_services, totals,
};
pub use billing::compute_invoice;
pub use lifecycle::{
    apply_transition, can_transition, update_fields, BookingPatch, PricingInput, TransitionInput,
};
pub use store::{BookingStore, InMemoryBookingStore};
