use actix_web::{web, HttpResponse};
use mailhorn_api_structs::process_due_jobs::*;
use mailhorn_domain::{Channel, NotificationJob};
use mailhorn_infra::{DeliveryError, MailhornContext};
use tracing::{info, warn};

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn process_due_jobs_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = ProcessDueJobsUseCase {
        batch_size: body.0.batch_size,
    };

    execute(usecase, &ctx)
        .await
        .map(|report| {
            HttpResponse::Ok().json(APIResponse {
                processed: report.processed,
                sent: report.sent,
                retried: report.retried,
                dead: report.dead,
            })
        })
        .map_err(MailhornError::from)
}

/// One dispatcher run: claim a batch of due jobs and hand each over
/// to its delivery provider. Safe to run concurrently, the job store
/// compare-and-swap guarantees a job is delivered by at most one run.
#[derive(Debug)]
pub(crate) struct ProcessDueJobsUseCase {
    pub batch_size: Option<usize>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct DispatchReport {
    pub processed: usize,
    pub sent: usize,
    pub retried: usize,
    pub dead: usize,
}

#[derive(Debug)]
pub(crate) enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Exponential backoff: base, 2x base, 4x base, ... capped
pub(crate) fn retry_backoff_millis(base: i64, max: i64, attempt: i64) -> i64 {
    let exp = (attempt - 1).clamp(0, 32) as u32;
    let delay = base.saturating_mul(2_i64.saturating_pow(exp));
    delay.min(max)
}

async fn deliver(job: &NotificationJob, ctx: &MailhornContext) -> Result<String, DeliveryError> {
    match job.channel {
        Channel::Email => {
            let subject = job.subject.as_deref().unwrap_or_default();
            ctx.providers
                .email
                .send(&job.recipient, subject, &job.body)
                .await
        }
        Channel::Sms => ctx.providers.sms.send(&job.recipient, &job.body).await,
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ProcessDueJobsUseCase {
    type Response = DispatchReport;

    type Error = UseCaseError;

    const NAME: &'static str = "ProcessDueJobs";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        let batch_size = self
            .batch_size
            .unwrap_or(ctx.config.dispatch_batch_size)
            .max(1);
        let now = ctx.sys.get_timestamp_millis();
        let due = ctx.repos.jobs.find_due(now, batch_size).await;

        let mut report = DispatchReport::default();
        for job in due {
            // Claim the job first. Another dispatcher run may have
            // picked up the same batch.
            match ctx.repos.jobs.start_delivery(&job.id, now).await {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!("Unable to claim job: {}. Error: {:?}", job.id, e);
                    continue;
                }
            }
            report.processed += 1;

            match deliver(&job, ctx).await {
                Ok(provider_message_id) => {
                    if let Err(e) = ctx
                        .repos
                        .jobs
                        .mark_sent(&job.id, &provider_message_id, now)
                        .await
                    {
                        warn!("Unable to mark job: {} as sent. Error: {:?}", job.id, e);
                        continue;
                    }
                    report.sent += 1;
                }
                Err(delivery_error) => {
                    let attempts = job.attempts + 1;
                    let error = delivery_error.to_string();
                    if attempts >= job.max_attempts {
                        info!(
                            "Job: {} exhausted its {} delivery attempts, marking dead",
                            job.id, job.max_attempts
                        );
                        if let Err(e) =
                            ctx.repos.jobs.mark_dead(&job.id, attempts, &error, now).await
                        {
                            warn!("Unable to mark job: {} as dead. Error: {:?}", job.id, e);
                            continue;
                        }
                        report.dead += 1;
                    } else {
                        let delay = retry_backoff_millis(
                            ctx.config.retry_base_delay_millis,
                            ctx.config.retry_max_delay_millis,
                            attempts,
                        );
                        if let Err(e) = ctx
                            .repos
                            .jobs
                            .schedule_retry(&job.id, attempts, now + delay, &error, now)
                            .await
                        {
                            warn!("Unable to schedule retry for job: {}. Error: {:?}", job.id, e);
                            continue;
                        }
                        report.retried += 1;
                    }
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailhorn_domain::{Booking, Customer, JobStatus, MessageTemplate, Tenant, Trigger, ID};
    use mailhorn_infra::{
        Config, DeliveryProviders, FakeSys, InMemoryEmailProvider, InMemorySmsProvider,
        MailhornContext, Repos,
    };
    use std::sync::Arc;

    struct TestHarness {
        ctx: MailhornContext,
        sys: Arc<FakeSys>,
        email: Arc<InMemoryEmailProvider>,
        sms: Arc<InMemorySmsProvider>,
    }

    fn harness(now: i64) -> TestHarness {
        let sys = Arc::new(FakeSys::new(now));
        let email = Arc::new(InMemoryEmailProvider::new());
        let sms = Arc::new(InMemorySmsProvider::new());
        let ctx = MailhornContext {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: sys.clone(),
            providers: DeliveryProviders {
                email: email.clone(),
                sms: sms.clone(),
            },
        };
        TestHarness {
            ctx,
            sys,
            email,
            sms,
        }
    }

    async fn seed_email_job(ctx: &MailhornContext, scheduled_at: i64) -> NotificationJob {
        let tenant = Tenant::new("Glow Salon");
        ctx.repos.tenants.insert(&tenant).await.unwrap();
        let mut customer = Customer::new(tenant.id.clone(), "Ann");
        customer.email = Some("ann@example.com".into());
        ctx.repos.customers.insert(&customer).await.unwrap();
        let booking = Booking {
            id: Default::default(),
            tenant_id: tenant.id.clone(),
            customer_id: customer.id.clone(),
            service_name: "Haircut".into(),
            service_duration_min: 45,
            service_price_cents: 3500,
            staff_name: None,
            start_ts: scheduled_at + 1_000_000,
            end_ts: scheduled_at + 2_000_000,
            reference: Booking::generate_reference(),
            created: 0,
            updated: 0,
        };
        ctx.repos.bookings.insert(&booking).await.unwrap();
        let template = MessageTemplate::new(
            tenant.id.clone(),
            Trigger::BookingCreated,
            Channel::Email,
            "Welcome",
            "Hi Ann",
            0,
        );
        ctx.repos.templates.insert(&template).await.unwrap();

        let job = NotificationJob {
            id: Default::default(),
            tenant_id: tenant.id,
            booking_id: booking.id,
            template_id: template.id,
            trigger: Trigger::BookingCreated,
            channel: Channel::Email,
            status: JobStatus::Pending,
            recipient: "ann@example.com".into(),
            subject: Some("Your booking".into()),
            body: "Hi Ann".into(),
            scheduled_at,
            attempts: 0,
            max_attempts: 3,
            last_error: None,
            provider_message_id: None,
            created: 0,
            updated: 0,
        };
        assert!(ctx.repos.jobs.insert(&job).await.unwrap());
        job
    }

    async fn run(ctx: &MailhornContext) -> DispatchReport {
        execute(ProcessDueJobsUseCase { batch_size: None }, ctx)
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn sends_due_jobs_and_skips_future_ones() {
        let h = harness(1000);
        let due = seed_email_job(&h.ctx, 500).await;
        let future_job = NotificationJob {
            id: ID::new(),
            booking_id: ID::new(),
            scheduled_at: 50_000,
            ..due.clone()
        };
        h.ctx.repos.jobs.insert(&future_job).await.unwrap();

        let report = run(&h.ctx).await;
        assert_eq!(
            report,
            DispatchReport {
                processed: 1,
                sent: 1,
                retried: 0,
                dead: 0
            }
        );
        assert_eq!(h.email.sent_count(), 1);

        let stored = h.ctx.repos.jobs.find(&due.id).await.unwrap();
        assert_eq!(stored.status, JobStatus::Sent);
        assert!(stored.provider_message_id.is_some());

        let untouched = h.ctx.repos.jobs.find(&future_job.id).await.unwrap();
        assert_eq!(untouched.status, JobStatus::Pending);
    }

    #[actix_web::test]
    async fn failed_delivery_is_retried_with_backoff() {
        let h = harness(1000);
        let job = seed_email_job(&h.ctx, 500).await;
        h.email.fail_times(1);

        let report = run(&h.ctx).await;
        assert_eq!(report.retried, 1);
        let stored = h.ctx.repos.jobs.find(&job.id).await.unwrap();
        assert_eq!(stored.status, JobStatus::Pending);
        assert_eq!(stored.attempts, 1);
        assert_eq!(
            stored.scheduled_at,
            1000 + h.ctx.config.retry_base_delay_millis
        );
        assert!(stored.last_error.as_deref().unwrap().contains("http_502"));

        // Not due yet, a run right after the failure does nothing
        let report = run(&h.ctx).await;
        assert_eq!(report.processed, 0);

        // After the backoff the retry goes through
        h.sys.set_timestamp_millis(stored.scheduled_at);
        let report = run(&h.ctx).await;
        assert_eq!(report.sent, 1);
        assert_eq!(h.email.sent_count(), 1);
    }

    #[actix_web::test]
    async fn exhausted_attempts_mark_the_job_dead() {
        let h = harness(1000);
        let job = seed_email_job(&h.ctx, 500).await;
        h.email.fail_times(10);

        for _ in 0..3 {
            run(&h.ctx).await;
            let stored = h.ctx.repos.jobs.find(&job.id).await.unwrap();
            h.sys.set_timestamp_millis(stored.scheduled_at.max(1000));
        }

        let stored = h.ctx.repos.jobs.find(&job.id).await.unwrap();
        assert_eq!(stored.status, JobStatus::Dead);
        assert_eq!(stored.attempts, 3);
        assert_eq!(h.email.sent_count(), 0);

        // Dead jobs never come back
        h.sys.advance_millis(1_000_000_000);
        let report = run(&h.ctx).await;
        assert_eq!(report.processed, 0);
    }

    #[actix_web::test]
    async fn concurrent_runs_deliver_each_job_once() {
        let h = harness(1000);
        seed_email_job(&h.ctx, 500).await;

        let (a, b) = futures::join!(run(&h.ctx), run(&h.ctx));
        assert_eq!(a.sent + b.sent, 1);
        assert_eq!(a.processed + b.processed, 1);
        assert_eq!(h.email.sent_count(), 1);
    }

    #[actix_web::test]
    async fn sms_jobs_go_through_the_sms_provider() {
        let h = harness(1000);
        let email_job = seed_email_job(&h.ctx, 500).await;
        let sms_job = NotificationJob {
            id: ID::new(),
            channel: Channel::Sms,
            recipient: "+15550100".into(),
            subject: None,
            ..email_job.clone()
        };
        h.ctx.repos.jobs.insert(&sms_job).await.unwrap();

        let report = run(&h.ctx).await;
        assert_eq!(report.sent, 2);
        assert_eq!(h.email.sent_count(), 1);
        assert_eq!(h.sms.sent_count(), 1);
        assert_eq!(h.sms.sent.lock().unwrap()[0], ("+15550100".into(), "Hi Ann".into()));
    }

    #[actix_web::test]
    async fn one_failing_job_does_not_block_the_batch() {
        let h = harness(1000);
        let first = seed_email_job(&h.ctx, 400).await;
        let second = NotificationJob {
            id: ID::new(),
            booking_id: ID::new(),
            scheduled_at: 500,
            ..first.clone()
        };
        h.ctx.repos.jobs.insert(&second).await.unwrap();
        // First due job fails, the rest of the batch still goes out
        h.email.fail_times(1);

        let report = run(&h.ctx).await;
        assert_eq!(report.processed, 2);
        assert_eq!(report.sent, 1);
        assert_eq!(report.retried, 1);
    }

    #[test]
    fn backoff_grows_exponentially_and_caps() {
        let base = 60_000;
        let max = 3_600_000;
        assert_eq!(retry_backoff_millis(base, max, 1), 60_000);
        assert_eq!(retry_backoff_millis(base, max, 2), 120_000);
        assert_eq!(retry_backoff_millis(base, max, 3), 240_000);
        assert_eq!(retry_backoff_millis(base, max, 7), 3_600_000);
        assert_eq!(retry_backoff_millis(base, max, 100), 3_600_000);
    }
}
