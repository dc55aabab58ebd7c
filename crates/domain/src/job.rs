use crate::channel::Channel;
use crate::shared::entity::{Entity, ID};
use crate::trigger::Trigger;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Delivery state of a `NotificationJob`.
///
/// ```text
/// pending -> in_progress -> sent                    (terminal)
///                        -> pending  (retry, backoff)
///                        -> dead                    (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    Sent,
    Dead,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in_progress",
            JobStatus::Sent => "sent",
            JobStatus::Dead => "dead",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Sent | JobStatus::Dead)
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidJobStatusError {
    #[error("Invalid job status: {0}")]
    Malformed(String),
}

impl FromStr for JobStatus {
    type Err = InvalidJobStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "in_progress" => Ok(JobStatus::InProgress),
            "sent" => Ok(JobStatus::Sent),
            "dead" => Ok(JobStatus::Dead),
            _ => Err(InvalidJobStatusError::Malformed(s.to_string())),
        }
    }
}

/// A persisted, schedulable unit of outbound message delivery.
///
/// Jobs are the system of record for delivery state. Content
/// (recipient, subject, body) is rendered once at emission time and
/// never changes afterwards; only status and attempt metadata move.
/// The natural key for deduplication is
/// (tenant_id, booking_id, trigger, channel).
#[derive(Debug, Clone)]
pub struct NotificationJob {
    pub id: ID,
    pub tenant_id: ID,
    pub booking_id: ID,
    /// The template the content was rendered from, for traceability
    pub template_id: ID,
    pub trigger: Trigger,
    pub channel: Channel,
    pub status: JobStatus,
    /// Email address or E.164 phone number depending on channel
    pub recipient: String,
    pub subject: Option<String>,
    pub body: String,
    /// When the job becomes due, millis since epoch
    pub scheduled_at: i64,
    /// Number of delivery attempts made so far
    pub attempts: i64,
    pub max_attempts: i64,
    pub last_error: Option<String>,
    /// Message id returned by the delivery provider once sent
    pub provider_message_id: Option<String>,
    pub created: i64,
    pub updated: i64,
}

impl NotificationJob {
    pub fn is_due(&self, now: i64) -> bool {
        self.status == JobStatus::Pending && self.scheduled_at <= now
    }

    pub fn same_dedup_key(&self, other: &NotificationJob) -> bool {
        self.tenant_id == other.tenant_id
            && self.booking_id == other.booking_id
            && self.trigger == other.trigger
            && self.channel == other.channel
    }
}

impl Entity for NotificationJob {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_roundtrips_job_statuses() {
        for status in [
            JobStatus::Pending,
            JobStatus::InProgress,
            JobStatus::Sent,
            JobStatus::Dead,
        ] {
            assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), status);
        }
        assert!("donezo".parse::<JobStatus>().is_err());
    }

    #[test]
    fn only_pending_jobs_past_their_schedule_are_due() {
        let job = NotificationJob {
            id: Default::default(),
            tenant_id: Default::default(),
            booking_id: Default::default(),
            template_id: Default::default(),
            trigger: Trigger::BookingCreated,
            channel: Channel::Email,
            status: JobStatus::Pending,
            recipient: "ann@example.com".into(),
            subject: None,
            body: "hello".into(),
            scheduled_at: 100,
            attempts: 0,
            max_attempts: 3,
            last_error: None,
            provider_message_id: None,
            created: 0,
            updated: 0,
        };
        assert!(!job.is_due(99));
        assert!(job.is_due(100));

        let sent = NotificationJob {
            status: JobStatus::Sent,
            ..job
        };
        assert!(!sent.is_due(1000));
    }
}
