use mailhorn_domain::{Channel, JobStatus, NotificationJob, Trigger, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

use super::IJobRepo;

pub struct PostgresJobRepo {
    pool: PgPool,
}

impl PostgresJobRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct JobRaw {
    job_uid: Uuid,
    tenant_uid: Uuid,
    booking_uid: Uuid,
    template_uid: Uuid,
    trigger: String,
    channel: String,
    status: String,
    recipient: String,
    subject: Option<String>,
    body: String,
    scheduled_at: i64,
    attempts: i64,
    max_attempts: i64,
    last_error: Option<String>,
    provider_message_id: Option<String>,
    created: i64,
    updated: i64,
}

impl TryFrom<JobRaw> for NotificationJob {
    type Error = anyhow::Error;

    fn try_from(raw: JobRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.job_uid.into(),
            tenant_id: raw.tenant_uid.into(),
            booking_id: raw.booking_uid.into(),
            template_id: raw.template_uid.into(),
            trigger: raw.trigger.parse::<Trigger>()?,
            channel: raw.channel.parse::<Channel>()?,
            status: raw.status.parse::<JobStatus>()?,
            recipient: raw.recipient,
            subject: raw.subject,
            body: raw.body,
            scheduled_at: raw.scheduled_at,
            attempts: raw.attempts,
            max_attempts: raw.max_attempts,
            last_error: raw.last_error,
            provider_message_id: raw.provider_message_id,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

fn rows_into_jobs(rows: Vec<JobRaw>) -> Vec<NotificationJob> {
    rows.into_iter()
        .filter_map(|raw| raw.try_into().ok())
        .collect()
}

const UNIQUE_VIOLATION: &str = "23505";

#[async_trait::async_trait]
impl IJobRepo for PostgresJobRepo {
    async fn insert(&self, job: &NotificationJob) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO notification_jobs
            (job_uid, tenant_uid, booking_uid, template_uid, trigger, channel,
             status, recipient, subject, body, scheduled_at, attempts,
             max_attempts, last_error, provider_message_id, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(job.id.inner_ref())
        .bind(job.tenant_id.inner_ref())
        .bind(job.booking_id.inner_ref())
        .bind(job.template_id.inner_ref())
        .bind(job.trigger.as_str())
        .bind(job.channel.as_str())
        .bind(job.status.as_str())
        .bind(&job.recipient)
        .bind(&job.subject)
        .bind(&job.body)
        .bind(job.scheduled_at)
        .bind(job.attempts)
        .bind(job.max_attempts)
        .bind(&job.last_error)
        .bind(&job.provider_message_id)
        .bind(job.created)
        .bind(job.updated)
        .execute(&self.pool)
        .await;

        match res {
            Ok(_) => Ok(true),
            // The dedup index turns a duplicate emission into a no-op
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Ok(false)
            }
            Err(e) => {
                error!(
                    "Unable to insert notification job with id: {}. DB returned error: {:?}",
                    job.id, e
                );
                Err(e.into())
            }
        }
    }

    async fn find(&self, job_id: &ID) -> Option<NotificationJob> {
        sqlx::query_as::<_, JobRaw>(
            r#"
            SELECT * FROM notification_jobs
            WHERE job_uid = $1
            "#,
        )
        .bind(job_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .and_then(|raw| raw.try_into().ok())
    }

    async fn find_by_booking(&self, booking_id: &ID) -> Vec<NotificationJob> {
        let rows = sqlx::query_as::<_, JobRaw>(
            r#"
            SELECT * FROM notification_jobs
            WHERE booking_uid = $1
            ORDER BY created ASC
            "#,
        )
        .bind(booking_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();
        rows_into_jobs(rows)
    }

    async fn find_by_tenant(
        &self,
        tenant_id: &ID,
        status: Option<JobStatus>,
    ) -> Vec<NotificationJob> {
        let rows = sqlx::query_as::<_, JobRaw>(
            r#"
            SELECT * FROM notification_jobs
            WHERE tenant_uid = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY created ASC
            "#,
        )
        .bind(tenant_id.inner_ref())
        .bind(status.map(|s| s.as_str().to_string()))
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();
        rows_into_jobs(rows)
    }

    async fn find_due(&self, now: i64, limit: usize) -> Vec<NotificationJob> {
        let rows = sqlx::query_as::<_, JobRaw>(
            r#"
            SELECT * FROM notification_jobs
            WHERE status = 'pending' AND scheduled_at <= $1
            ORDER BY scheduled_at ASC
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();
        rows_into_jobs(rows)
    }

    async fn count_due(&self, now: i64) -> anyhow::Result<i64> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM notification_jobs
            WHERE status = 'pending' AND scheduled_at <= $1
            "#,
        )
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(count.0)
    }

    async fn start_delivery(&self, job_id: &ID, now: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE notification_jobs
            SET status = 'in_progress', updated = $2
            WHERE job_uid = $1 AND status = 'pending'
            "#,
        )
        .bind(job_id.inner_ref())
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    async fn mark_sent(
        &self,
        job_id: &ID,
        provider_message_id: &str,
        now: i64,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE notification_jobs
            SET status = 'sent', provider_message_id = $2, last_error = NULL, updated = $3
            WHERE job_uid = $1
            "#,
        )
        .bind(job_id.inner_ref())
        .bind(provider_message_id)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn schedule_retry(
        &self,
        job_id: &ID,
        attempts: i64,
        scheduled_at: i64,
        error: &str,
        now: i64,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE notification_jobs
            SET status = 'pending', attempts = $2, scheduled_at = $3,
                last_error = $4, updated = $5
            WHERE job_uid = $1
            "#,
        )
        .bind(job_id.inner_ref())
        .bind(attempts)
        .bind(scheduled_at)
        .bind(error)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_dead(
        &self,
        job_id: &ID,
        attempts: i64,
        error: &str,
        now: i64,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE notification_jobs
            SET status = 'dead', attempts = $2, last_error = $3, updated = $4
            WHERE job_uid = $1
            "#,
        )
        .bind(job_id.inner_ref())
        .bind(attempts)
        .bind(error)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
