use actix_web::{web, HttpResponse};
use mailhorn_api_structs::list_templates::*;
use mailhorn_domain::{Channel, MessageTemplate, Trigger, ID};
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn list_templates_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = ListTemplatesUseCase {
        tenant_id: query.0.tenant_id,
        trigger: query.0.trigger,
        channel: query.0.channel,
    };

    execute(usecase, &ctx)
        .await
        .map(|templates| HttpResponse::Ok().json(APIResponse::new(templates)))
        .map_err(MailhornError::from)
}

#[derive(Debug)]
struct ListTemplatesUseCase {
    pub tenant_id: ID,
    pub trigger: Option<Trigger>,
    pub channel: Option<Channel>,
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
impl UseCase for ListTemplatesUseCase {
    type Response = Vec<MessageTemplate>;

    type Error = UseCaseError;

    const NAME: &'static str = "ListTemplates";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.tenants.find(&self.tenant_id).await.is_none() {
            return Err(UseCaseError::TenantNotFound(self.tenant_id.clone()));
        }
        Ok(ctx
            .repos
            .templates
            .find_by_tenant(&self.tenant_id, self.trigger, self.channel)
            .await)
    }
}
