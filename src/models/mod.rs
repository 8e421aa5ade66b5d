//! Domain models for the booking core.

mod booking;
mod invoice;
mod report;

pub use booking::{Actor, Booking, BookingState, BookingStatus, CustomerRef, ServiceRef};
pub use invoice::{Invoice, GST_RATE};
pub use report::{
    BookingTotals, CommissionReport, CommissionRow, DateRange, RankedEntry, ReportKind,
    ReportTarget, RevenuePoint, StatusCount,
};
