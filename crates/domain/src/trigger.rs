use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

const HOUR_MILLIS: i64 = 60 * 60 * 1000;

/// The symbolic event type that causes notification emission.
///
/// Triggers are raised by the booking side of the platform (or by an
/// external caller through the emit endpoint) and decide which
/// templates are looked up and how the resulting jobs are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    BookingCreated,
    BookingConfirmed,
    /// Reminder sent 24 hours before the appointment starts
    ReminderUpcoming,
    /// Reminder sent 1 hour before the appointment starts
    ReminderImminent,
    BookingCancelled,
    BookingRescheduled,
    BookingCompleted,
    FeeCharged,
    RefundIssued,
    PaymentFailed,
}

/// How `scheduled_at` is computed for jobs created by a `Trigger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    /// The job is due as soon as it is created
    Immediate,
    /// The job is due the given amount of millis before the
    /// appointment starts
    BeforeAppointment { offset_millis: i64 },
}

impl Trigger {
    pub fn all() -> [Trigger; 10] {
        [
            Trigger::BookingCreated,
            Trigger::BookingConfirmed,
            Trigger::ReminderUpcoming,
            Trigger::ReminderImminent,
            Trigger::BookingCancelled,
            Trigger::BookingRescheduled,
            Trigger::BookingCompleted,
            Trigger::FeeCharged,
            Trigger::RefundIssued,
            Trigger::PaymentFailed,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::BookingCreated => "booking_created",
            Trigger::BookingConfirmed => "booking_confirmed",
            Trigger::ReminderUpcoming => "reminder_upcoming",
            Trigger::ReminderImminent => "reminder_imminent",
            Trigger::BookingCancelled => "booking_cancelled",
            Trigger::BookingRescheduled => "booking_rescheduled",
            Trigger::BookingCompleted => "booking_completed",
            Trigger::FeeCharged => "fee_charged",
            Trigger::RefundIssued => "refund_issued",
            Trigger::PaymentFailed => "payment_failed",
        }
    }

    pub fn schedule_kind(&self) -> ScheduleKind {
        match self {
            Trigger::ReminderUpcoming => ScheduleKind::BeforeAppointment {
                offset_millis: 24 * HOUR_MILLIS,
            },
            Trigger::ReminderImminent => ScheduleKind::BeforeAppointment {
                offset_millis: HOUR_MILLIS,
            },
            _ => ScheduleKind::Immediate,
        }
    }
}

impl Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidTriggerError {
    #[error("Invalid trigger: {0}")]
    Malformed(String),
}

impl FromStr for Trigger {
    type Err = InvalidTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Trigger::all()
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InvalidTriggerError::Malformed(s.to_string()))
    }
}
