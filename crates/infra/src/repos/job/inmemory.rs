use std::sync::Mutex;

use mailhorn_domain::{JobStatus, NotificationJob, ID};

use super::IJobRepo;
use crate::repos::shared::inmemory_repo::*;

pub struct InMemoryJobRepo {
    jobs: Mutex<Vec<NotificationJob>>,
}

impl InMemoryJobRepo {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IJobRepo for InMemoryJobRepo {
    async fn insert(&self, job: &NotificationJob) -> anyhow::Result<bool> {
        let mut collection = self.jobs.lock().unwrap();
        if collection.iter().any(|j| j.same_dedup_key(job)) {
            return Ok(false);
        }
        collection.push(job.clone());
        Ok(true)
    }

    async fn find(&self, job_id: &ID) -> Option<NotificationJob> {
        find(job_id, &self.jobs)
    }

    async fn find_by_booking(&self, booking_id: &ID) -> Vec<NotificationJob> {
        find_by(&self.jobs, |j| j.booking_id == *booking_id)
    }

    async fn find_by_tenant(
        &self,
        tenant_id: &ID,
        status: Option<JobStatus>,
    ) -> Vec<NotificationJob> {
        find_by(&self.jobs, |j| {
            j.tenant_id == *tenant_id && status.map(|s| j.status == s).unwrap_or(true)
        })
    }

    async fn find_due(&self, now: i64, limit: usize) -> Vec<NotificationJob> {
        let mut due = find_by(&self.jobs, |j| j.is_due(now));
        due.sort_by_key(|j| j.scheduled_at);
        due.truncate(limit);
        due
    }

    async fn count_due(&self, now: i64) -> anyhow::Result<i64> {
        Ok(find_by(&self.jobs, |j| j.is_due(now)).len() as i64)
    }

    async fn start_delivery(&self, job_id: &ID, now: i64) -> anyhow::Result<bool> {
        Ok(update_one(job_id, &self.jobs, |job| {
            if job.status != JobStatus::Pending {
                return false;
            }
            job.status = JobStatus::InProgress;
            job.updated = now;
            true
        }))
    }

    async fn mark_sent(
        &self,
        job_id: &ID,
        provider_message_id: &str,
        now: i64,
    ) -> anyhow::Result<()> {
        update_one(job_id, &self.jobs, |job| {
            job.status = JobStatus::Sent;
            job.provider_message_id = Some(provider_message_id.to_string());
            job.last_error = None;
            job.updated = now;
            true
        });
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
        update_one(job_id, &self.jobs, |job| {
            job.status = JobStatus::Pending;
            job.attempts = attempts;
            job.scheduled_at = scheduled_at;
            job.last_error = Some(error.to_string());
            job.updated = now;
            true
        });
        Ok(())
    }

    async fn mark_dead(
        &self,
        job_id: &ID,
        attempts: i64,
        error: &str,
        now: i64,
    ) -> anyhow::Result<()> {
        update_one(job_id, &self.jobs, |job| {
            job.status = JobStatus::Dead;
            job.attempts = attempts;
            job.last_error = Some(error.to_string());
            job.updated = now;
            true
        });
        Ok(())
    }
}
