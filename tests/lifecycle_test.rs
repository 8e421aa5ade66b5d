//! Lifecycle state machine integration tests.

mod common;

use booking_core::{
    apply_transition, can_transition, update_fields, Actor, BookingError, BookingPatch,
    BookingStatus, TransitionInput,
};
use chrono::{NaiveDate, NaiveTime};
use common::{booking_in, pending_booking};
use rust_decimal_macros::dec;

const ALL_STATUSES: [BookingStatus; 8] = [
    BookingStatus::Pending,
    BookingStatus::Accepted,
    BookingStatus::Arrived,
    BookingStatus::InProgress,
    BookingStatus::WorkCompleted,
    BookingStatus::Completed,
    BookingStatus::Rejected,
    BookingStatus::Cancelled,
];

/// Input that satisfies every edge's precondition, so failures in the sweep
/// below can only come from the table itself.
fn permissive_input() -> TransitionInput {
    TransitionInput {
        message: Some("sweep".to_string()),
        pricing: Some(booking_core::PricingInput {
            service_price: dec!(100),
            service_charge: dec!(50),
        }),
    }
}

#[test]
fn pairs_outside_the_table_fail_with_invalid_transition() {
    for from in ALL_STATUSES {
        if from.is_terminal() {
            continue;
        }
        for to in ALL_STATUSES {
            if to == from || can_transition(from, to) {
                continue;
            }
            let booking = booking_in(from);
            let before = booking.clone();
            for actor in [Actor::Customer, Actor::Provider, Actor::Admin] {
                let result = apply_transition(before.clone(), to, actor, permissive_input());
                assert_eq!(
                    result,
                    Err(BookingError::InvalidTransition { from, to }),
                    "{from} -> {to} as {actor} should be invalid"
                );
            }
            assert_eq!(booking, before);
        }
    }
}

#[test]
fn terminal_bookings_reject_every_operation() {
    for status in [
        BookingStatus::Completed,
        BookingStatus::Rejected,
        BookingStatus::Cancelled,
    ] {
        let booking = booking_in(status);
        for to in ALL_STATUSES {
            let result =
                apply_transition(booking.clone(), to, Actor::Provider, permissive_input());
            assert_eq!(result, Err(BookingError::BookingTerminal(status)));
        }
        // Including the no-op re-application and field updates.
        let result = apply_transition(
            booking.clone(),
            status,
            Actor::Provider,
            TransitionInput::default(),
        );
        assert_eq!(result, Err(BookingError::BookingTerminal(status)));
        let result = update_fields(
            booking,
            BookingPatch {
                notes: Some("too late".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(result, Err(BookingError::BookingTerminal(status)));
    }
}

#[test]
fn reapplying_the_current_status_is_a_noop() {
    for status in ALL_STATUSES {
        if status.is_terminal() {
            continue;
        }
        let booking = booking_in(status);
        let before = booking.clone();
        let after =
            apply_transition(booking, status, Actor::Provider, TransitionInput::default())
                .unwrap();
        assert_eq!(after, before, "no-op must not mutate a {status} booking");
    }
}

#[test]
fn happy_path_reaches_work_completed_with_an_invoice() {
    let booking = pending_booking();
    let booking = apply_transition(
        booking,
        BookingStatus::Accepted,
        Actor::Provider,
        TransitionInput::default(),
    )
    .unwrap();
    let booking = apply_transition(
        booking,
        BookingStatus::Arrived,
        Actor::Provider,
        TransitionInput::default(),
    )
    .unwrap();
    let booking = apply_transition(
        booking,
        BookingStatus::InProgress,
        Actor::Provider,
        TransitionInput::default(),
    )
    .unwrap();
    let booking = apply_transition(
        booking,
        BookingStatus::WorkCompleted,
        Actor::Provider,
        TransitionInput::with_pricing(dec!(100), dec!(50)),
    )
    .unwrap();

    assert_eq!(booking.status(), BookingStatus::WorkCompleted);
    let invoice = booking.invoice().expect("invoice attached");
    assert_eq!(invoice.total_amount, dec!(177.00));

    // No way back once work is done.
    let result = apply_transition(
        booking.clone(),
        BookingStatus::InProgress,
        Actor::Provider,
        TransitionInput::default(),
    );
    assert_eq!(
        result,
        Err(BookingError::InvalidTransition {
            from: BookingStatus::WorkCompleted,
            to: BookingStatus::InProgress,
        })
    );

    // Customer confirmation carries the invoice across.
    let booking = apply_transition(
        booking,
        BookingStatus::Completed,
        Actor::Customer,
        TransitionInput::default(),
    )
    .unwrap();
    assert_eq!(booking.status(), BookingStatus::Completed);
    assert_eq!(booking.invoice().unwrap().total_amount, dec!(177.00));
}

#[test]
fn failed_invoice_computation_leaves_status_untouched() {
    let booking = booking_in(BookingStatus::InProgress);
    let before = booking.clone();

    let result = apply_transition(
        booking,
        BookingStatus::WorkCompleted,
        Actor::Provider,
        TransitionInput::with_pricing(dec!(-1), dec!(0)),
    );
    assert!(matches!(result, Err(BookingError::InvalidInvoiceInput(_))));

    // Missing pricing is also a billing-input defect.
    let result = apply_transition(
        before.clone(),
        BookingStatus::WorkCompleted,
        Actor::Provider,
        TransitionInput::default(),
    );
    assert!(matches!(result, Err(BookingError::InvalidInvoiceInput(_))));

    assert_eq!(before.status(), BookingStatus::InProgress);
    assert!(before.invoice().is_none());
}

#[test]
fn rejecting_and_cancelling_require_a_reason() {
    let result = apply_transition(
        pending_booking(),
        BookingStatus::Rejected,
        Actor::Provider,
        TransitionInput::default(),
    );
    assert_eq!(
        result,
        Err(BookingError::MessageRequired(BookingStatus::Rejected))
    );

    // Whitespace does not count as a reason.
    let result = apply_transition(
        booking_in(BookingStatus::Accepted),
        BookingStatus::Cancelled,
        Actor::Customer,
        TransitionInput::with_message("   "),
    );
    assert_eq!(
        result,
        Err(BookingError::MessageRequired(BookingStatus::Cancelled))
    );

    let booking = apply_transition(
        booking_in(BookingStatus::Accepted),
        BookingStatus::Cancelled,
        Actor::Customer,
        TransitionInput::with_message("provider asked to rebook"),
    )
    .unwrap();
    assert_eq!(booking.message(), Some("provider asked to rebook"));
}

#[test]
fn actors_outside_the_edge_are_forbidden() {
    // Customers cannot accept.
    let result = apply_transition(
        pending_booking(),
        BookingStatus::Accepted,
        Actor::Customer,
        TransitionInput::default(),
    );
    assert_eq!(
        result,
        Err(BookingError::ForbiddenTransition {
            actor: Actor::Customer,
            from: BookingStatus::Pending,
            to: BookingStatus::Accepted,
        })
    );

    // Providers cannot confirm completion on the customer's behalf.
    let result = apply_transition(
        booking_in(BookingStatus::WorkCompleted),
        BookingStatus::Completed,
        Actor::Provider,
        TransitionInput::default(),
    );
    assert_eq!(
        result,
        Err(BookingError::ForbiddenTransition {
            actor: Actor::Provider,
            from: BookingStatus::WorkCompleted,
            to: BookingStatus::Completed,
        })
    );
}

#[test]
fn admin_is_forbidden_on_every_edge() {
    for from in ALL_STATUSES {
        for to in ALL_STATUSES {
            if !can_transition(from, to) {
                continue;
            }
            let result =
                apply_transition(booking_in(from), to, Actor::Admin, permissive_input());
            assert_eq!(
                result,
                Err(BookingError::ForbiddenTransition {
                    actor: Actor::Admin,
                    from,
                    to
                })
            );
        }
    }
}

#[test]
fn work_completed_cannot_be_cancelled_by_anyone() {
    for actor in [Actor::Customer, Actor::Provider, Actor::Admin] {
        let result = apply_transition(
            booking_in(BookingStatus::WorkCompleted),
            BookingStatus::Cancelled,
            actor,
            TransitionInput::with_message("second thoughts"),
        );
        assert_eq!(
            result,
            Err(BookingError::InvalidTransition {
                from: BookingStatus::WorkCompleted,
                to: BookingStatus::Cancelled,
            })
        );
    }
}

#[test]
fn fields_are_editable_while_pending_or_accepted() {
    let new_date = NaiveDate::from_ymd_opt(2026, 9, 15).unwrap();
    let new_time = NaiveTime::from_hms_opt(14, 30, 0).unwrap();

    for status in [BookingStatus::Pending, BookingStatus::Accepted] {
        let booking = update_fields(
            booking_in(status),
            BookingPatch {
                scheduled_date: Some(new_date),
                scheduled_time: Some(new_time),
                notes: Some("gate code 4711".to_string()),
            },
        )
        .unwrap();
        assert_eq!(booking.scheduled_date, new_date);
        assert_eq!(booking.scheduled_time, new_time);
        assert_eq!(booking.notes.as_deref(), Some("gate code 4711"));
    }
}

#[test]
fn fields_lock_once_work_has_started() {
    for status in [
        BookingStatus::Arrived,
        BookingStatus::InProgress,
        BookingStatus::WorkCompleted,
    ] {
        let result = update_fields(
            booking_in(status),
            BookingPatch {
                scheduled_date: Some(NaiveDate::from_ymd_opt(2026, 9, 15).unwrap()),
                ..Default::default()
            },
        );
        assert_eq!(
            result,
            Err(BookingError::FieldLocked {
                field: "scheduled_date",
                status,
            })
        );

        // An empty patch touches nothing and passes.
        let booking = booking_in(status);
        let before = booking.clone();
        assert_eq!(update_fields(booking, BookingPatch::default()), Ok(before));
    }
}
