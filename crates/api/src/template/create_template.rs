use actix_web::{web, HttpResponse};
use mailhorn_api_structs::create_template::*;
use mailhorn_domain::{unsupported_placeholders, Channel, MessageTemplate, Trigger, ID};
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn create_template_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = CreateTemplateUseCase {
        tenant_id: body.0.tenant_id,
        trigger: body.0.trigger,
        channel: body.0.channel,
        name: body.0.name,
        subject: body.0.subject,
        body: body.0.body,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.template, res.unsupported)))
        .map_err(MailhornError::from)
}

#[derive(Debug)]
struct CreateTemplateUseCase {
    pub tenant_id: ID,
    pub trigger: Trigger,
    pub channel: Channel,
    pub name: String,
    pub subject: Option<String>,
    pub body: String,
}

#[derive(Debug)]
struct UseCaseRes {
    pub template: MessageTemplate,
    pub unsupported: Vec<String>,
}

#[derive(Debug)]
enum UseCaseError {
    TenantNotFound(ID),
    EmptyBody,
    StorageError,
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::TenantNotFound(tenant_id) => {
                Self::NotFound(format!("The tenant with id: {}, was not found.", tenant_id))
            }
            UseCaseError::EmptyBody => {
                Self::BadClientData("Template body cannot be empty.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTemplateUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateTemplate";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.tenants.find(&self.tenant_id).await.is_none() {
            return Err(UseCaseError::TenantNotFound(self.tenant_id.clone()));
        }
        if self.body.trim().is_empty() {
            return Err(UseCaseError::EmptyBody);
        }

        let now = ctx.sys.get_timestamp_millis();
        let mut template = MessageTemplate::new(
            self.tenant_id.clone(),
            self.trigger,
            self.channel,
            &self.name,
            &self.body,
            now,
        );
        template.subject = self.subject.clone();

        // Unknown but well formed placeholders are allowed; they are
        // reported back so authors can catch typos early
        let mut unsupported = unsupported_placeholders(&template.body);
        if let Some(subject) = &template.subject {
            for token in unsupported_placeholders(subject) {
                if !unsupported.contains(&token) {
                    unsupported.push(token);
                }
            }
        }

        ctx.repos
            .templates
            .insert(&template)
            .await
            .map(|_| UseCaseRes {
                template,
                unsupported,
            })
            .map_err(|_| UseCaseError::StorageError)
    }
}
