//! Analytics aggregator.
//!
//! Pure reductions over booking collections already fetched and scoped by
//! the caller. Reporting must not fail wholesale because of one corrupt
//! record, so a booking with an unresolved service, customer, or invoice
//! contributes zero or `"Unknown"` to the relevant bucket and is logged at
//! `warn` level. No function here reads a clock; callers pass `now` where a
//! reference point is needed, which keeps two identical invocations
//! bit-identical.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{
    Booking, BookingStatus, BookingTotals, CommissionReport, CommissionRow, DateRange,
    RankedEntry, ReportKind, ReportTarget, RevenuePoint, StatusCount,
};

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// How many ranking rows the dashboards show.
const TOP_N: usize = 5;

/// Months covered by the revenue trend, current month included.
const TREND_MONTHS: usize = 6;

/// Headline totals for a dashboard scope.
///
/// `consult_fee` is the flat per-job placeholder used to estimate revenue
/// for accepted-but-unconfirmed jobs, which have no invoice yet.
pub fn totals(bookings: &[Booking], consult_fee: Decimal) -> BookingTotals {
    let mut total_revenue = Decimal::ZERO;
    let mut pending_revenue = Decimal::ZERO;
    let mut completed_jobs = 0u64;

    for booking in bookings {
        let status = booking.status();
        if status == BookingStatus::Completed {
            completed_jobs += 1;
            match booking.invoice() {
                Some(invoice) => total_revenue += invoice.total_amount,
                None => warn!(
                    booking_id = %booking.booking_id,
                    "completed booking has no invoice, contributing zero revenue"
                ),
            }
        } else if status.is_active() {
            pending_revenue += consult_fee;
        }
    }

    let total_jobs = bookings.len() as u64;
    let completion_rate = if total_jobs == 0 {
        0
    } else {
        // Integer round-half-up of 100 * completed / total.
        ((200 * completed_jobs + total_jobs) / (2 * total_jobs)) as u32
    };

    BookingTotals {
        total_revenue,
        pending_revenue,
        total_jobs,
        completed_jobs,
        completion_rate,
    }
}

/// Revenue of completed bookings bucketed into the trailing six calendar
/// months ending at the month of `now`, oldest first, zero-filled.
///
/// Bookings are assigned to the month of their `updated_at` (when the
/// customer confirmed); anything outside the window is dropped.
pub fn revenue_trend(bookings: &[Booking], now: DateTime<Utc>) -> Vec<RevenuePoint> {
    let mut months = [(0i32, 0u32); TREND_MONTHS];
    let (mut year, mut month) = (now.year(), now.month());
    for slot in months.iter_mut().rev() {
        *slot = (year, month);
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }

    let mut buckets = vec![Decimal::ZERO; TREND_MONTHS];
    for booking in bookings {
        if booking.status() != BookingStatus::Completed {
            continue;
        }
        let Some(invoice) = booking.invoice() else {
            continue;
        };
        let stamp = (booking.updated_at.year(), booking.updated_at.month());
        if let Some(i) = months.iter().position(|&m| m == stamp) {
            buckets[i] += invoice.total_amount;
        }
    }

    months
        .iter()
        .zip(buckets)
        .map(|(&(year, month), revenue)| RevenuePoint {
            month: format!("{} {}", MONTH_ABBR[month as usize - 1], year),
            revenue,
        })
        .collect()
}

/// Count of bookings per status, in first-occurrence order.
pub fn status_distribution(bookings: &[Booking]) -> Vec<StatusCount> {
    let mut counts: Vec<StatusCount> = Vec::new();
    for booking in bookings {
        let status = booking.status();
        match counts.iter_mut().find(|c| c.status == status) {
            Some(entry) => entry.count += 1,
            None => counts.push(StatusCount { status, count: 1 }),
        }
    }
    counts
}

/// Group bookings by a key, count them, and return the `n` largest groups.
///
/// The sort is stable and groups are accumulated in first-encountered
/// order, so ties rank in input order; dashboards rely on that for
/// deterministic output.
pub fn top_n_by_count<F>(bookings: &[Booking], key_fn: F, n: usize) -> Vec<RankedEntry>
where
    F: Fn(&Booking) -> String,
{
    let mut entries: Vec<RankedEntry> = Vec::new();
    for booking in bookings {
        let key = key_fn(booking);
        match entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.count += 1,
            None => entries.push(RankedEntry { key, count: 1 }),
        }
    }
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(n);
    entries
}

/// The five most-booked services, by service title.
pub fn top_services(bookings: &[Booking]) -> Vec<RankedEntry> {
    top_n_by_count(bookings, service_name, TOP_N)
}

/// The five customers with the most bookings, by username.
pub fn top_customers(bookings: &[Booking]) -> Vec<RankedEntry> {
    top_n_by_count(
        bookings,
        |b| match &b.customer {
            Some(customer) => customer.username.clone(),
            None => {
                warn!(booking_id = %b.booking_id, "booking has no resolved customer");
                "Unknown".to_string()
            }
        },
        TOP_N,
    )
}

/// Admin-facing commission report over a date-and-target-filtered subset.
///
/// The window applies to `updated_at` (when money settled). Every matching
/// booking contributes a row and counts toward `total_bookings`; the
/// monetary sums are restricted to completed bookings with an invoice.
pub fn commission_report(
    bookings: &[Booking],
    range: Option<&DateRange>,
    target: Option<ReportTarget>,
) -> CommissionReport {
    let kind = match target {
        None => ReportKind::Total,
        Some(ReportTarget::Provider(_)) => ReportKind::Provider,
        Some(ReportTarget::Service(_)) => ReportKind::ServiceCommission,
    };

    let mut total_revenue = Decimal::ZERO;
    let mut total_commission = Decimal::ZERO;
    let mut total_earned = Decimal::ZERO;
    let mut rows: Vec<CommissionRow> = Vec::new();

    for booking in bookings {
        if let Some(range) = range {
            if !range.contains(booking.updated_at) {
                continue;
            }
        }
        match target {
            Some(ReportTarget::Provider(id)) if booking.provider_id != id => continue,
            Some(ReportTarget::Service(id))
                if booking.service.as_ref().map(|s| s.service_id) != Some(id) =>
            {
                continue
            }
            _ => {}
        }

        let (amount, commission) = match booking.invoice() {
            Some(invoice) => (invoice.total_amount, invoice.commission),
            None => (Decimal::ZERO, Decimal::ZERO),
        };
        if booking.status() == BookingStatus::Completed {
            if let Some(invoice) = booking.invoice() {
                total_revenue += invoice.total_amount;
                total_commission += invoice.commission;
                total_earned += invoice.provider_earning;
            }
        }
        rows.push(CommissionRow {
            booking_id: booking.booking_id,
            service_name: service_name(booking),
            date: booking.scheduled_date,
            amount,
            commission,
        });
    }

    CommissionReport {
        kind,
        total_bookings: rows.len() as u64,
        total_revenue,
        total_commission,
        total_earned,
        bookings: rows,
    }
}

fn service_name(booking: &Booking) -> String {
    match &booking.service {
        Some(service) => service.title.clone(),
        None => {
            warn!(booking_id = %booking.booking_id, "booking has no resolved service");
            "Unknown".to_string()
        }
    }
}
