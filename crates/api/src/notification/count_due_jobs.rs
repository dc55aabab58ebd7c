use actix_web::{web, HttpResponse};
use mailhorn_api_structs::count_due_jobs::*;
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn count_due_jobs_controller(
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = CountDueJobsUseCase;

    execute(usecase, &ctx)
        .await
        .map(|due| HttpResponse::Ok().json(APIResponse { due }))
        .map_err(MailhornError::from)
}

/// Dispatcher backlog size, used by operators to spot a stuck queue
#[derive(Debug)]
struct CountDueJobsUseCase;

#[derive(Debug)]
enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CountDueJobsUseCase {
    type Response = i64;

    type Error = UseCaseError;

    const NAME: &'static str = "CountDueJobs";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        ctx.repos
            .jobs
            .count_due(now)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
