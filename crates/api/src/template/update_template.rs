use actix_web::{web, HttpResponse};
use mailhorn_api_structs::update_template::*;
use mailhorn_domain::{unsupported_placeholders, MessageTemplate, ID};
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn update_template_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = UpdateTemplateUseCase {
        template_id: path.template_id.clone(),
        name: body.0.name,
        subject: body.0.subject,
        body: body.0.body,
        enabled: body.0.enabled,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.template, res.unsupported)))
        .map_err(MailhornError::from)
}

#[derive(Debug)]
struct UpdateTemplateUseCase {
    pub template_id: ID,
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug)]
struct UseCaseRes {
    pub template: MessageTemplate,
    pub unsupported: Vec<String>,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    EmptyBody,
    StorageError,
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(template_id) => Self::NotFound(format!(
                "The template with id: {}, was not found.",
                template_id
            )),
            UseCaseError::EmptyBody => {
                Self::BadClientData("Template body cannot be empty.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateTemplateUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateTemplate";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        let mut template = ctx
            .repos
            .templates
            .find(&self.template_id)
            .await
            .filter(|t| !t.deleted)
            .ok_or_else(|| UseCaseError::NotFound(self.template_id.clone()))?;

        if let Some(name) = &self.name {
            template.name = name.clone();
        }
        if let Some(subject) = &self.subject {
            template.subject = Some(subject.clone());
        }
        if let Some(body) = &self.body {
            if body.trim().is_empty() {
                return Err(UseCaseError::EmptyBody);
            }
            template.body = body.clone();
        }
        if let Some(enabled) = self.enabled {
            template.enabled = enabled;
        }
        template.updated = ctx.sys.get_timestamp_millis();

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
            .save(&template)
            .await
            .map(|_| UseCaseRes {
                template,
                unsupported,
            })
            .map_err(|_| UseCaseError::StorageError)
    }
}
