use actix_web::{web, HttpResponse};
use mailhorn_api_structs::get_template::*;
use mailhorn_domain::{unsupported_placeholders, MessageTemplate, ID};
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn get_template_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = GetTemplateUseCase {
        template_id: path.template_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|template| {
            let unsupported = unsupported_placeholders(&template.body);
            HttpResponse::Ok().json(APIResponse::new(template, unsupported))
        })
        .map_err(MailhornError::from)
}

#[derive(Debug)]
struct GetTemplateUseCase {
    pub template_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(template_id) => Self::NotFound(format!(
                "The template with id: {}, was not found.",
                template_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTemplateUseCase {
    type Response = MessageTemplate;

    type Error = UseCaseError;

    const NAME: &'static str = "GetTemplate";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .templates
            .find(&self.template_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.template_id.clone()))
    }
}
