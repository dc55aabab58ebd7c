use actix_web::{web, HttpResponse};
use mailhorn_api_structs::get_job::*;
use mailhorn_domain::{NotificationJob, ID};
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn get_job_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = GetJobUseCase {
        job_id: path.job_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|job| HttpResponse::Ok().json(APIResponse::new(job)))
        .map_err(MailhornError::from)
}

#[derive(Debug)]
struct GetJobUseCase {
    pub job_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(job_id) => {
                Self::NotFound(format!("The job with id: {}, was not found.", job_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetJobUseCase {
    type Response = NotificationJob;

    type Error = UseCaseError;

    const NAME: &'static str = "GetJob";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .jobs
            .find(&self.job_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.job_id.clone()))
    }
}
