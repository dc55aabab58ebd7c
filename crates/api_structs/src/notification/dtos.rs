use mailhorn_domain::{Channel, JobStatus, NotificationJob, Trigger};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationJobDTO {
    pub id: String,
    pub tenant_id: String,
    pub booking_id: String,
    pub template_id: String,
    pub trigger: Trigger,
    pub channel: Channel,
    pub status: JobStatus,
    pub recipient: String,
    pub subject: Option<String>,
    pub body: String,
    pub scheduled_at: i64,
    pub attempts: i64,
    pub max_attempts: i64,
    pub last_error: Option<String>,
    pub provider_message_id: Option<String>,
    pub created: i64,
    pub updated: i64,
}

impl NotificationJobDTO {
    pub fn new(job: &NotificationJob) -> Self {
        Self {
            id: job.id.as_string(),
            tenant_id: job.tenant_id.as_string(),
            booking_id: job.booking_id.as_string(),
            template_id: job.template_id.as_string(),
            trigger: job.trigger,
            channel: job.channel,
            status: job.status,
            recipient: job.recipient.clone(),
            subject: job.subject.clone(),
            body: job.body.clone(),
            scheduled_at: job.scheduled_at,
            attempts: job.attempts,
            max_attempts: job.max_attempts,
            last_error: job.last_error.clone(),
            provider_message_id: job.provider_message_id.clone(),
            created: job.created,
            updated: job.updated,
        }
    }
}
