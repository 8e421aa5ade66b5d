//! Shared fixtures for integration tests.

#![allow(dead_code)]

use booking_core::{
    apply_transition, Actor, Booking, BookingState, BookingStatus, CustomerRef, Invoice,
    ServiceRef, TransitionInput, GST_RATE,
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

pub fn service(title: &str, price: Decimal, commission_rate: Decimal) -> ServiceRef {
    ServiceRef {
        service_id: Uuid::new_v4(),
        title: title.to_string(),
        price,
        category: "Cleaning".to_string(),
        commission_rate,
    }
}

pub fn customer(username: &str) -> CustomerRef {
    CustomerRef {
        user_id: Uuid::new_v4(),
        username: username.to_string(),
    }
}

/// A fresh pending booking for a deep-cleaning job at 10% commission.
pub fn pending_booking() -> Booking {
    Booking::new(
        customer("asha"),
        Uuid::new_v4(),
        service("Deep Cleaning", dec!(100), dec!(10)),
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    )
}

/// Drive a pending booking along the happy path up to `target` using the
/// real state machine.
pub fn advance_to(mut booking: Booking, target: BookingStatus) -> Booking {
    let path = [
        (BookingStatus::Accepted, Actor::Provider),
        (BookingStatus::Arrived, Actor::Provider),
        (BookingStatus::InProgress, Actor::Provider),
        (BookingStatus::WorkCompleted, Actor::Provider),
        (BookingStatus::Completed, Actor::Customer),
    ];
    for (next, actor) in path {
        if booking.status() == target {
            break;
        }
        let input = match next {
            BookingStatus::WorkCompleted => TransitionInput::with_pricing(dec!(100), dec!(50)),
            _ => TransitionInput::default(),
        };
        booking = apply_transition(booking, next, actor, input).unwrap();
    }
    booking
}

/// A booking in `status`, reached through real transitions where a path
/// exists (rejected and cancelled take their own edges).
pub fn booking_in(status: BookingStatus) -> Booking {
    let booking = pending_booking();
    match status {
        BookingStatus::Rejected => apply_transition(
            booking,
            BookingStatus::Rejected,
            Actor::Provider,
            TransitionInput::with_message("fully booked that day"),
        )
        .unwrap(),
        BookingStatus::Cancelled => {
            let accepted = advance_to(booking, BookingStatus::Accepted);
            apply_transition(
                accepted,
                BookingStatus::Cancelled,
                Actor::Customer,
                TransitionInput::with_message("change of plans"),
            )
            .unwrap()
        }
        _ => advance_to(booking, status),
    }
}

/// Invoice fixture with a chosen total; internals are not balanced, only
/// the aggregated fields matter.
pub fn invoice_with_total(total: Decimal, commission_rate: Decimal) -> Invoice {
    let commission = (total * commission_rate / dec!(100)).round_dp(2);
    Invoice {
        service_price: total,
        service_charge: Decimal::ZERO,
        gst_rate: GST_RATE,
        gst: Decimal::ZERO,
        total_amount: total,
        commission_rate,
        commission,
        provider_earning: total - commission,
    }
}

/// A completed booking whose invoice totals `total`, settled at `settled`.
pub fn completed_booking(total: Decimal, commission_rate: Decimal, settled: DateTime<Utc>) -> Booking {
    let mut booking = pending_booking();
    booking.state = BookingState::Completed {
        invoice: invoice_with_total(total, commission_rate),
    };
    booking.updated_at = settled;
    booking
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}
