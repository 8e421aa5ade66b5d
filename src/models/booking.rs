//! Booking model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::Invoice;

/// Booking status tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Arrived,
    InProgress,
    WorkCompleted,
    Completed,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Arrived => "arrived",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::WorkCompleted => "work_completed",
            BookingStatus::Completed => "completed",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Unknown, blank, or missing status strings fall back to `Pending`,
    /// which is how legacy records with no status are reported.
    pub fn from_string(s: &str) -> Self {
        match s {
            "accepted" => BookingStatus::Accepted,
            "arrived" => BookingStatus::Arrived,
            "in_progress" => BookingStatus::InProgress,
            "work_completed" => BookingStatus::WorkCompleted,
            "completed" => BookingStatus::Completed,
            "rejected" => BookingStatus::Rejected,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }

    /// Terminal states accept no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed | BookingStatus::Rejected | BookingStatus::Cancelled
        )
    }

    /// States where the provider has taken the job but the customer has not
    /// yet confirmed completion. Used for pending-revenue estimation.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            BookingStatus::Accepted
                | BookingStatus::Arrived
                | BookingStatus::InProgress
                | BookingStatus::WorkCompleted
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of the principal attempting an operation, supplied explicitly by
/// the identity collaborator rather than read from ambient session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Customer,
    Provider,
    Admin,
}

impl Actor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Actor::Customer => "customer",
            Actor::Provider => "provider",
            Actor::Admin => "admin",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved service reference carried on a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRef {
    pub service_id: Uuid,
    pub title: String,
    pub price: Decimal,
    pub category: String,
    /// Platform cut as a percentage, 0-100.
    pub commission_rate: Decimal,
}

/// Resolved customer reference carried on a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub user_id: Uuid,
    pub username: String,
}

/// Status together with its status-dependent payload.
///
/// The invoice exists exactly on `WorkCompleted` and `Completed`, and the
/// reason message exactly on `Rejected` and `Cancelled`; no other shape is
/// representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookingState {
    Pending,
    Accepted,
    Arrived,
    InProgress,
    WorkCompleted { invoice: Invoice },
    Completed { invoice: Invoice },
    Rejected { message: String },
    Cancelled { message: String },
}

impl BookingState {
    /// The plain status tag for this state.
    pub fn status(&self) -> BookingStatus {
        match self {
            BookingState::Pending => BookingStatus::Pending,
            BookingState::Accepted => BookingStatus::Accepted,
            BookingState::Arrived => BookingStatus::Arrived,
            BookingState::InProgress => BookingStatus::InProgress,
            BookingState::WorkCompleted { .. } => BookingStatus::WorkCompleted,
            BookingState::Completed { .. } => BookingStatus::Completed,
            BookingState::Rejected { .. } => BookingStatus::Rejected,
            BookingState::Cancelled { .. } => BookingStatus::Cancelled,
        }
    }

    pub fn invoice(&self) -> Option<&Invoice> {
        match self {
            BookingState::WorkCompleted { invoice } | BookingState::Completed { invoice } => {
                Some(invoice)
            }
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            BookingState::Rejected { message } | BookingState::Cancelled { message } => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

/// One requested service engagement between a customer and a provider.
///
/// `customer` and `service` are optional because reporting must tolerate
/// records whose references failed to resolve; the lifecycle requires a
/// resolved service before an invoice can be computed. Bookings are never
/// deleted, they are retained for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: Uuid,
    pub customer: Option<CustomerRef>,
    pub provider_id: Uuid,
    pub service: Option<ServiceRef>,
    #[serde(flatten)]
    pub state: BookingState,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Create a new pending booking, the customer-initiated entry point of
    /// the lifecycle.
    pub fn new(
        customer: CustomerRef,
        provider_id: Uuid,
        service: ServiceRef,
        scheduled_date: NaiveDate,
        scheduled_time: NaiveTime,
    ) -> Self {
        let now = Utc::now();
        Self {
            booking_id: Uuid::new_v4(),
            customer: Some(customer),
            provider_id,
            service: Some(service),
            state: BookingState::Pending,
            scheduled_date,
            scheduled_time,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status(&self) -> BookingStatus {
        self.state.status()
    }

    pub fn invoice(&self) -> Option<&Invoice> {
        self.state.invoice()
    }

    pub fn message(&self) -> Option<&str> {
        self.state.message()
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }
}
