//! Report and analytics summary models.
//!
//! Derived, never persisted; recomputed on each request from a booking
//! collection plus optional filters.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BookingError, Result};
use crate::models::BookingStatus;

/// Inclusive report window. Invalid windows (start after end) cannot be
/// constructed, so the aggregation functions themselves are total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(BookingError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Headline numbers for a dashboard scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingTotals {
    /// Sum of invoice totals over completed bookings.
    pub total_revenue: Decimal,
    /// Flat consult-fee estimate for jobs accepted but not yet confirmed.
    pub pending_revenue: Decimal,
    pub total_jobs: u64,
    pub completed_jobs: u64,
    /// Completed share of all jobs, rounded to a whole percentage.
    pub completion_rate: u32,
}

/// One month bucket of the revenue trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// Month label, e.g. `"Mar 2026"`.
    pub month: String,
    pub revenue: Decimal,
}

/// Count of bookings sharing one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: BookingStatus,
    pub count: u64,
}

/// One row of a top-N ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub key: String,
    pub count: u64,
}

/// Scope of a commission report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Total,
    Provider,
    ServiceCommission,
}

/// Target filter for a commission report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTarget {
    Provider(Uuid),
    Service(Uuid),
}

/// One booking line of a commission report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRow {
    pub booking_id: Uuid,
    pub service_name: String,
    /// The appointment date the customer recognizes.
    pub date: NaiveDate,
    pub amount: Decimal,
    pub commission: Decimal,
}

/// Admin-facing commission report over a filtered booking subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionReport {
    pub kind: ReportKind,
    pub total_bookings: u64,
    pub total_revenue: Decimal,
    pub total_commission: Decimal,
    pub total_earned: Decimal,
    pub bookings: Vec<CommissionRow>,
}
