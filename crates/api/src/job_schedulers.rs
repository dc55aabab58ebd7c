use std::time::Duration;

use actix_web::rt::time::interval;
use mailhorn_infra::MailhornContext;
use tracing::info;

use crate::notification::process_due_jobs::ProcessDueJobsUseCase;
use crate::shared::usecase::execute;

/// Background dispatcher loop. Each tick runs one batched delivery
/// pass, the same operation the `/notifications/process-due` endpoint
/// exposes for manual draining.
pub fn start_dispatch_job(ctx: MailhornContext) {
    actix_web::rt::spawn(async move {
        let mut interval = interval(Duration::from_secs(ctx.config.dispatch_interval_secs));
        loop {
            interval.tick().await;

            let usecase = ProcessDueJobsUseCase { batch_size: None };
            if let Ok(report) = execute(usecase, &ctx).await {
                if report.processed > 0 {
                    info!(
                        "Dispatched {} jobs: {} sent, {} retried, {} dead",
                        report.processed, report.sent, report.retried, report.dead
                    );
                }
            }
        }
    });
}
