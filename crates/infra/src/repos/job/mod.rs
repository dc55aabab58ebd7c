mod inmemory;
mod postgres;

pub use inmemory::InMemoryJobRepo;
use mailhorn_domain::{JobStatus, NotificationJob, ID};
pub use postgres::PostgresJobRepo;

/// The job store is the only shared mutable state between the
/// emission engine and the dispatcher, so all coordination happens
/// through its row level operations:
///
/// - `insert` enforces the (tenant, booking, trigger, channel) dedup
///   key; a duplicate is reported as `Ok(false)`, not an error.
/// - `start_delivery` is the pending -> in_progress compare-and-swap.
///   Two concurrent dispatcher runs racing for the same job get one
///   `true` and one `false`.
#[async_trait::async_trait]
pub trait IJobRepo: Send + Sync {
    /// Returns false when a job with the same dedup key already exists
    async fn insert(&self, job: &NotificationJob) -> anyhow::Result<bool>;
    async fn find(&self, job_id: &ID) -> Option<NotificationJob>;
    async fn find_by_booking(&self, booking_id: &ID) -> Vec<NotificationJob>;
    async fn find_by_tenant(
        &self,
        tenant_id: &ID,
        status: Option<JobStatus>,
    ) -> Vec<NotificationJob>;
    /// Pending jobs with `scheduled_at <= now`, oldest schedule first
    async fn find_due(&self, now: i64, limit: usize) -> Vec<NotificationJob>;
    async fn count_due(&self, now: i64) -> anyhow::Result<i64>;
    /// Atomically moves the job from pending to in_progress. Returns
    /// false when the job was not pending anymore (lost race or
    /// already finished).
    async fn start_delivery(&self, job_id: &ID, now: i64) -> anyhow::Result<bool>;
    async fn mark_sent(
        &self,
        job_id: &ID,
        provider_message_id: &str,
        now: i64,
    ) -> anyhow::Result<()>;
    /// Failure with attempts left: back to pending at a later schedule
    async fn schedule_retry(
        &self,
        job_id: &ID,
        attempts: i64,
        scheduled_at: i64,
        error: &str,
        now: i64,
    ) -> anyhow::Result<()>;
    /// Failure with the attempt budget exhausted
    async fn mark_dead(&self, job_id: &ID, attempts: i64, error: &str, now: i64)
        -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailhorn_domain::{Channel, Trigger};

    fn job_factory(tenant_id: &ID, booking_id: &ID, channel: Channel) -> NotificationJob {
        NotificationJob {
            id: Default::default(),
            tenant_id: tenant_id.clone(),
            booking_id: booking_id.clone(),
            template_id: Default::default(),
            trigger: Trigger::BookingCreated,
            channel,
            status: JobStatus::Pending,
            recipient: "ann@example.com".into(),
            subject: Some("Your booking".into()),
            body: "Hi Ann".into(),
            scheduled_at: 1000,
            attempts: 0,
            max_attempts: 3,
            last_error: None,
            provider_message_id: None,
            created: 0,
            updated: 0,
        }
    }

    #[tokio::test]
    async fn duplicate_dedup_keys_are_rejected_softly() {
        let repo = InMemoryJobRepo::new();
        let tenant_id = ID::new();
        let booking_id = ID::new();

        let first = job_factory(&tenant_id, &booking_id, Channel::Email);
        let second = job_factory(&tenant_id, &booking_id, Channel::Email);
        assert!(repo.insert(&first).await.unwrap());
        assert!(!repo.insert(&second).await.unwrap());

        // Different channel is a different dedup key
        let sms = job_factory(&tenant_id, &booking_id, Channel::Sms);
        assert!(repo.insert(&sms).await.unwrap());

        assert_eq!(repo.find_by_booking(&booking_id).await.len(), 2);
    }

    #[tokio::test]
    async fn due_selection_is_ordered_and_bounded() {
        let repo = InMemoryJobRepo::new();
        let tenant_id = ID::new();

        let mut late = job_factory(&tenant_id, &ID::new(), Channel::Email);
        late.scheduled_at = 3000;
        let mut early = job_factory(&tenant_id, &ID::new(), Channel::Email);
        early.scheduled_at = 1000;
        let mut future = job_factory(&tenant_id, &ID::new(), Channel::Email);
        future.scheduled_at = 9000;
        repo.insert(&late).await.unwrap();
        repo.insert(&early).await.unwrap();
        repo.insert(&future).await.unwrap();

        let due = repo.find_due(5000, 10).await;
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].id, early.id);
        assert_eq!(due[1].id, late.id);

        assert_eq!(repo.find_due(5000, 1).await.len(), 1);
        assert_eq!(repo.count_due(5000).await.unwrap(), 2);
        assert_eq!(repo.count_due(500).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn start_delivery_wins_only_once() {
        let repo = InMemoryJobRepo::new();
        let job = job_factory(&ID::new(), &ID::new(), Channel::Email);
        repo.insert(&job).await.unwrap();

        assert!(repo.start_delivery(&job.id, 2000).await.unwrap());
        // Second caller lost the race
        assert!(!repo.start_delivery(&job.id, 2000).await.unwrap());

        let stored = repo.find(&job.id).await.unwrap();
        assert_eq!(stored.status, JobStatus::InProgress);
    }

    #[tokio::test]
    async fn status_transitions_are_persisted() {
        let repo = InMemoryJobRepo::new();
        let tenant_id = ID::new();
        let job = job_factory(&tenant_id, &ID::new(), Channel::Email);
        repo.insert(&job).await.unwrap();

        repo.start_delivery(&job.id, 2000).await.unwrap();
        repo.schedule_retry(&job.id, 1, 5000, "timeout", 2000)
            .await
            .unwrap();
        let stored = repo.find(&job.id).await.unwrap();
        assert_eq!(stored.status, JobStatus::Pending);
        assert_eq!(stored.attempts, 1);
        assert_eq!(stored.scheduled_at, 5000);
        assert_eq!(stored.last_error.as_deref(), Some("timeout"));

        repo.start_delivery(&job.id, 5000).await.unwrap();
        repo.mark_sent(&job.id, "msg-123", 5000).await.unwrap();
        let stored = repo.find(&job.id).await.unwrap();
        assert_eq!(stored.status, JobStatus::Sent);
        assert_eq!(stored.provider_message_id.as_deref(), Some("msg-123"));

        let dead = job_factory(&tenant_id, &ID::new(), Channel::Email);
        repo.insert(&dead).await.unwrap();
        repo.start_delivery(&dead.id, 2000).await.unwrap();
        repo.mark_dead(&dead.id, 3, "invalid recipient", 2000)
            .await
            .unwrap();
        let stored = repo.find(&dead.id).await.unwrap();
        assert_eq!(stored.status, JobStatus::Dead);
        assert_eq!(stored.attempts, 3);

        let sent_jobs = repo.find_by_tenant(&tenant_id, Some(JobStatus::Sent)).await;
        assert_eq!(sent_jobs.len(), 1);
        assert_eq!(repo.find_by_tenant(&tenant_id, None).await.len(), 2);
    }
}
