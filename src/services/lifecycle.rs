//! Lifecycle state machine.
//!
//! The single authority for which status transitions a booking may undergo,
//! who may trigger them, and which preconditions gate them. Marking work
//! complete delegates to the billing calculator and commits status and
//! invoice together; there is no observable intermediate state because the
//! booking is consumed and returned whole.

use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{BookingError, Result};
use crate::models::{Actor, Booking, BookingState, BookingStatus};
use crate::services::billing::compute_invoice;

/// The transition table: (from, to, permitted actors).
///
/// `work_completed -> cancelled` is deliberately absent; the source UI was
/// inconsistent about it and it is resolved here as disallowed.
const TRANSITIONS: &[(BookingStatus, BookingStatus, &[Actor])] = &[
    (BookingStatus::Pending, BookingStatus::Accepted, &[Actor::Provider]),
    (BookingStatus::Pending, BookingStatus::Rejected, &[Actor::Provider]),
    (BookingStatus::Accepted, BookingStatus::Arrived, &[Actor::Provider]),
    (
        BookingStatus::Accepted,
        BookingStatus::Cancelled,
        &[Actor::Provider, Actor::Customer],
    ),
    (BookingStatus::Arrived, BookingStatus::InProgress, &[Actor::Provider]),
    (
        BookingStatus::Arrived,
        BookingStatus::Cancelled,
        &[Actor::Provider, Actor::Customer],
    ),
    (
        BookingStatus::InProgress,
        BookingStatus::WorkCompleted,
        &[Actor::Provider],
    ),
    (
        BookingStatus::InProgress,
        BookingStatus::Cancelled,
        &[Actor::Provider, Actor::Customer],
    ),
    (
        BookingStatus::WorkCompleted,
        BookingStatus::Completed,
        &[Actor::Customer],
    ),
];

/// Price inputs supplied by the provider when marking work complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingInput {
    pub service_price: Decimal,
    pub service_charge: Decimal,
}

/// Optional inputs accompanying a transition request.
#[derive(Debug, Clone, Default)]
pub struct TransitionInput {
    /// Reason, required when moving to `rejected` or `cancelled`.
    pub message: Option<String>,
    /// Billing inputs, required when moving to `work_completed`.
    pub pricing: Option<PricingInput>,
}

impl TransitionInput {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            pricing: None,
        }
    }

    pub fn with_pricing(service_price: Decimal, service_charge: Decimal) -> Self {
        Self {
            message: None,
            pricing: Some(PricingInput {
                service_price,
                service_charge,
            }),
        }
    }
}

/// Whether the transition table contains the (from, to) edge.
pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    TRANSITIONS.iter().any(|(f, t, _)| *f == from && *t == to)
}

/// Validate and apply a status transition.
///
/// Check order: terminal state, idempotent no-op, table membership, actor,
/// then per-edge preconditions. On success the returned booking carries the
/// new state (and, for `work_completed`, the freshly computed invoice) with
/// `updated_at` bumped; on failure the booking passed in was consumed
/// unchanged in meaning and the caller re-reads from its store.
pub fn apply_transition(
    mut booking: Booking,
    next: BookingStatus,
    actor: Actor,
    input: TransitionInput,
) -> Result<Booking> {
    let from = booking.status();

    if from.is_terminal() {
        return Err(BookingError::BookingTerminal(from));
    }
    if next == from {
        // Idempotent re-application of the current status.
        return Ok(booking);
    }

    let permitted = TRANSITIONS
        .iter()
        .find(|(f, t, _)| *f == from && *t == next)
        .map(|(_, _, actors)| *actors)
        .ok_or(BookingError::InvalidTransition { from, to: next })?;

    if !permitted.contains(&actor) {
        return Err(BookingError::ForbiddenTransition {
            actor,
            from,
            to: next,
        });
    }

    let state = match next {
        BookingStatus::Accepted => BookingState::Accepted,
        BookingStatus::Arrived => BookingState::Arrived,
        BookingStatus::InProgress => BookingState::InProgress,
        BookingStatus::Rejected => BookingState::Rejected {
            message: require_message(next, input.message)?,
        },
        BookingStatus::Cancelled => BookingState::Cancelled {
            message: require_message(next, input.message)?,
        },
        BookingStatus::WorkCompleted => {
            let pricing = input.pricing.ok_or_else(|| {
                BookingError::InvalidInvoiceInput(
                    "service price and service charge are required to complete work".to_string(),
                )
            })?;
            let commission_rate = booking
                .service
                .as_ref()
                .map(|s| s.commission_rate)
                .ok_or_else(|| {
                    BookingError::InvalidInvoiceInput(
                        "service reference missing, commission rate unknown".to_string(),
                    )
                })?;
            // Status only moves if invoice computation succeeds.
            let invoice =
                compute_invoice(pricing.service_price, pricing.service_charge, commission_rate)?;
            BookingState::WorkCompleted { invoice }
        }
        BookingStatus::Completed => {
            let BookingState::WorkCompleted { invoice } = booking.state else {
                return Err(BookingError::InvalidTransition { from, to: next });
            };
            BookingState::Completed { invoice }
        }
        // No edge re-enters pending; the table lookup above already failed.
        BookingStatus::Pending => {
            return Err(BookingError::InvalidTransition { from, to: next });
        }
    };

    booking.state = state;
    booking.updated_at = Utc::now();
    debug!(
        booking_id = %booking.booking_id,
        from = %from,
        to = %next,
        actor = %actor,
        "booking transition applied"
    );
    Ok(booking)
}

fn require_message(next: BookingStatus, message: Option<String>) -> Result<String> {
    match message {
        Some(m) if !m.trim().is_empty() => Ok(m),
        _ => Err(BookingError::MessageRequired(next)),
    }
}

/// Patch of the customer-editable fields.
#[derive(Debug, Clone, Default)]
pub struct BookingPatch {
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<NaiveTime>,
    pub notes: Option<String>,
}

impl BookingPatch {
    /// Name of the first field the patch touches, if any.
    fn touched_field(&self) -> Option<&'static str> {
        if self.scheduled_date.is_some() {
            Some("scheduled_date")
        } else if self.scheduled_time.is_some() {
            Some("scheduled_time")
        } else if self.notes.is_some() {
            Some("notes")
        } else {
            None
        }
    }
}

/// Update the reschedulable fields of a booking.
///
/// Permitted only while the booking is `pending` or `accepted`; once work
/// has started, rescheduling is meaningless. An empty patch is a no-op.
pub fn update_fields(mut booking: Booking, patch: BookingPatch) -> Result<Booking> {
    let status = booking.status();

    if status.is_terminal() {
        return Err(BookingError::BookingTerminal(status));
    }
    let Some(field) = patch.touched_field() else {
        return Ok(booking);
    };
    if !matches!(status, BookingStatus::Pending | BookingStatus::Accepted) {
        return Err(BookingError::FieldLocked { field, status });
    }

    if let Some(date) = patch.scheduled_date {
        booking.scheduled_date = date;
    }
    if let Some(time) = patch.scheduled_time {
        booking.scheduled_time = time;
    }
    if let Some(notes) = patch.notes {
        booking.notes = Some(notes);
    }
    booking.updated_at = Utc::now();
    Ok(booking)
}
