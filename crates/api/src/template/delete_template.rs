use actix_web::{web, HttpResponse};
use mailhorn_api_structs::delete_template::*;
use mailhorn_domain::{unsupported_placeholders, MessageTemplate, ID};
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn delete_template_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = DeleteTemplateUseCase {
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
struct DeleteTemplateUseCase {
    pub template_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(template_id) => Self::NotFound(format!(
                "The template with id: {}, was not found.",
                template_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteTemplateUseCase {
    type Response = MessageTemplate;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteTemplate";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        let mut template = ctx
            .repos
            .templates
            .find(&self.template_id)
            .await
            .filter(|t| !t.deleted)
            .ok_or_else(|| UseCaseError::NotFound(self.template_id.clone()))?;

        // Soft delete, already emitted jobs keep their rendered copy
        // and tooling can still inspect the template
        template.deleted = true;
        template.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .templates
            .save(&template)
            .await
            .map(|_| template)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailhorn_domain::{Channel, Tenant, Trigger};
    use mailhorn_infra::setup_context_inmemory;

    #[actix_web::test]
    async fn deleted_templates_are_not_effective_and_not_deletable_twice() {
        let ctx = setup_context_inmemory();
        let tenant = Tenant::new("Glow Salon");
        ctx.repos.tenants.insert(&tenant).await.unwrap();
        let template = MessageTemplate::new(
            tenant.id.clone(),
            Trigger::BookingCancelled,
            Channel::Sms,
            "Cancelled",
            "Your booking ${booking.ref} was cancelled",
            0,
        );
        ctx.repos.templates.insert(&template).await.unwrap();

        let usecase = DeleteTemplateUseCase {
            template_id: template.id.clone(),
        };
        let deleted = execute(usecase, &ctx).await.unwrap();
        assert!(deleted.deleted);

        let effective = ctx
            .repos
            .templates
            .find_effective(&tenant.id, Trigger::BookingCancelled, Channel::Sms)
            .await;
        assert!(effective.is_none());

        let usecase = DeleteTemplateUseCase {
            template_id: template.id.clone(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
