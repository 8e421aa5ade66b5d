//! Persistence collaborator contract.
//!
//! The core does no I/O of its own; a store supplies bookings and accepts
//! single atomic writes. Two racing transitions on the same booking are not
//! arbitrated here: the conditional write makes exactly one of them win,
//! and the loser observes [`BookingError::ConcurrencyConflict`], re-reads,
//! and retries.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use crate::error::{BookingError, Result};
use crate::models::{Booking, BookingStatus};

/// Storage contract required by the lifecycle's callers.
pub trait BookingStore {
    /// Fetch a booking by id.
    fn get(&self, booking_id: Uuid) -> Result<Booking>;

    /// Register a newly created booking.
    fn insert(&self, booking: Booking) -> Result<()>;

    /// Write back a mutated booking, status and invoice together, but only
    /// if the stored status still matches `expected`. The optimistic check
    /// is what keeps the status/invoice pair atomic under races.
    fn update_if_status(&self, expected: BookingStatus, booking: Booking) -> Result<()>;

    /// All bookings, for the reporting consumer.
    fn list(&self) -> Vec<Booking>;
}

/// Mutex-backed reference store used by tests and embedders without a
/// database; the production store is an external collaborator.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    bookings: Mutex<HashMap<Uuid, Booking>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookingStore for InMemoryBookingStore {
    fn get(&self, booking_id: Uuid) -> Result<Booking> {
        self.bookings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&booking_id)
            .cloned()
            .ok_or(BookingError::NotFound(booking_id))
    }

    fn insert(&self, booking: Booking) -> Result<()> {
        self.bookings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(booking.booking_id, booking);
        Ok(())
    }

    fn update_if_status(&self, expected: BookingStatus, booking: Booking) -> Result<()> {
        let mut bookings = self.bookings.lock().unwrap_or_else(PoisonError::into_inner);
        let stored = bookings
            .get(&booking.booking_id)
            .ok_or(BookingError::NotFound(booking.booking_id))?;
        let found = stored.status();
        if found != expected {
            return Err(BookingError::ConcurrencyConflict { expected, found });
        }
        bookings.insert(booking.booking_id, booking);
        Ok(())
    }

    fn list(&self) -> Vec<Booking> {
        self.bookings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}
