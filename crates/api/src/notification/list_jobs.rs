use actix_web::{web, HttpResponse};
use mailhorn_api_structs::list_jobs::*;
use mailhorn_domain::{JobStatus, NotificationJob, ID};
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn list_jobs_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = ListJobsUseCase {
        tenant_id: query.0.tenant_id,
        status: query.0.status,
    };

    execute(usecase, &ctx)
        .await
        .map(|jobs| HttpResponse::Ok().json(APIResponse::new(jobs)))
        .map_err(MailhornError::from)
}

#[derive(Debug)]
struct ListJobsUseCase {
    pub tenant_id: ID,
    pub status: Option<JobStatus>,
}

#[derive(Debug)]
enum UseCaseError {
    TenantNotFound(ID),
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::TenantNotFound(tenant_id) => {
                Self::NotFound(format!("The tenant with id: {}, was not found.", tenant_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ListJobsUseCase {
    type Response = Vec<NotificationJob>;

    type Error = UseCaseError;

    const NAME: &'static str = "ListJobs";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.tenants.find(&self.tenant_id).await.is_none() {
            return Err(UseCaseError::TenantNotFound(self.tenant_id.clone()));
        }
        Ok(ctx
            .repos
            .jobs
            .find_by_tenant(&self.tenant_id, self.status)
            .await)
    }
}
