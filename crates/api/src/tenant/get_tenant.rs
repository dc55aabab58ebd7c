use actix_web::{web, HttpResponse};
use mailhorn_api_structs::get_tenant::*;
use mailhorn_domain::{Tenant, ID};
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn get_tenant_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = GetTenantUseCase {
        tenant_id: path.tenant_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|tenant| HttpResponse::Ok().json(APIResponse::new(tenant)))
        .map_err(MailhornError::from)
}

#[derive(Debug)]
struct GetTenantUseCase {
    pub tenant_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(tenant_id) => {
                Self::NotFound(format!("The tenant with id: {}, was not found.", tenant_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTenantUseCase {
    type Response = Tenant;

    type Error = UseCaseError;

    const NAME: &'static str = "GetTenant";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .tenants
            .find(&self.tenant_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.tenant_id.clone()))
    }
}
