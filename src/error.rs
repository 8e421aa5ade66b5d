//! Typed failures returned by the booking core.
//!
//! Every error is a closed domain variant handed back to the immediate
//! caller; the core never logs-and-swallows or retries on its own.
//! [`BookingError::ConcurrencyConflict`] is the only variant for which a
//! blind re-read-and-retry is safe.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Actor, BookingStatus};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    /// The (from, to) pair is not in the transition table.
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// The booking is in a terminal state and accepts no further operation.
    #[error("booking is terminal in state {0}")]
    BookingTerminal(BookingStatus),

    /// The acting role is not permitted on this edge.
    #[error("{actor} may not move a booking from {from} to {to}")]
    ForbiddenTransition {
        actor: Actor,
        from: BookingStatus,
        to: BookingStatus,
    },

    /// A field update was attempted outside its permitted state window.
    #[error("field {field} is locked while booking is {status}")]
    FieldLocked {
        field: &'static str,
        status: BookingStatus,
    },

    /// Rejecting or cancelling requires a reason message.
    #[error("a reason message is required when moving to {0}")]
    MessageRequired(BookingStatus),

    /// Negative or out-of-range billing input.
    #[error("invalid invoice input: {0}")]
    InvalidInvoiceInput(String),

    /// The stored status no longer matches the expected prior value.
    #[error("stale write: expected status {expected}, found {found}")]
    ConcurrencyConflict {
        expected: BookingStatus,
        found: BookingStatus,
    },

    /// A report window whose start falls after its end.
    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// No booking with this id in the store.
    #[error("booking {0} not found")]
    NotFound(Uuid),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BookingError>;
