use actix_web::{web, HttpResponse};
use mailhorn_api_structs::preview_template::*;
use mailhorn_domain::{render, RenderContext, ID};
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn preview_template_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = PreviewTemplateUseCase {
        template_id: path.template_id.clone(),
        customer_name: body.0.customer_name,
        service_name: body.0.service_name,
        staff_name: body.0.staff_name,
        start_ts: body.0.start_ts,
        amount_cents: body.0.amount_cents,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                subject: res.subject,
                body: res.body,
            })
        })
        .map_err(MailhornError::from)
}

#[derive(Debug)]
struct PreviewTemplateUseCase {
    pub template_id: ID,
    pub customer_name: Option<String>,
    pub service_name: Option<String>,
    pub staff_name: Option<String>,
    pub start_ts: Option<i64>,
    pub amount_cents: Option<i64>,
}

#[derive(Debug)]
struct UseCaseRes {
    pub subject: Option<String>,
    pub body: String,
}

#[derive(Debug)]
enum UseCaseError {
    TemplateNotFound(ID),
    TenantNotFound(ID),
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::TemplateNotFound(template_id) => Self::NotFound(format!(
                "The template with id: {}, was not found.",
                template_id
            )),
            UseCaseError::TenantNotFound(tenant_id) => {
                Self::NotFound(format!("The tenant with id: {}, was not found.", tenant_id))
            }
        }
    }
}

// One day, two hours past midnight UTC into the future, so previews
// are stable within a request but clearly not a real booking
const SAMPLE_START_OFFSET_MILLIS: i64 = 26 * 60 * 60 * 1000;

#[async_trait::async_trait(?Send)]
impl UseCase for PreviewTemplateUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "PreviewTemplate";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        let template = ctx
            .repos
            .templates
            .find(&self.template_id)
            .await
            .ok_or_else(|| UseCaseError::TemplateNotFound(self.template_id.clone()))?;
        let tenant = ctx
            .repos
            .tenants
            .find(&template.tenant_id)
            .await
            .ok_or_else(|| UseCaseError::TenantNotFound(template.tenant_id.clone()))?;

        let start_ts = self
            .start_ts
            .unwrap_or(ctx.sys.get_timestamp_millis() + SAMPLE_START_OFFSET_MILLIS);

        let render_ctx = RenderContext {
            customer_name: self
                .customer_name
                .clone()
                .unwrap_or_else(|| "Alex Sample".into()),
            customer_email: Some("alex@example.com".into()),
            customer_phone: Some("+15550100".into()),
            service_name: self
                .service_name
                .clone()
                .unwrap_or_else(|| "Sample Service".into()),
            service_duration_min: 45,
            service_price_cents: 3500,
            currency: tenant.currency.clone(),
            staff_name: self.staff_name.clone(),
            start_ts,
            timezone: tenant.timezone,
            business_name: tenant.name.clone(),
            business_email: tenant.contact_email.clone(),
            business_phone: tenant.contact_phone.clone(),
            reference: "BK-SAMPLE".into(),
            booking_url: format!(
                "{}/b/BK-SAMPLE",
                ctx.config.portal_base_url.trim_end_matches('/')
            ),
            amount_cents: self.amount_cents,
        };

        Ok(UseCaseRes {
            subject: template.subject.as_deref().map(|s| render(s, &render_ctx)),
            body: render(&template.body, &render_ctx),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailhorn_domain::{Channel, MessageTemplate, Tenant, Trigger};
    use mailhorn_infra::setup_context_inmemory;

    #[actix_web::test]
    async fn renders_sample_context_with_overrides() {
        let ctx = setup_context_inmemory();
        let tenant = Tenant::new("Glow Salon");
        ctx.repos.tenants.insert(&tenant).await.unwrap();
        let mut template = MessageTemplate::new(
            tenant.id.clone(),
            Trigger::BookingCreated,
            Channel::Email,
            "Welcome",
            "Hi ${customer.name}, ${service.name} at ${business.name} costs ${service.price}",
            0,
        );
        template.subject = Some("Booking ${booking.ref}".into());
        ctx.repos.templates.insert(&template).await.unwrap();

        let usecase = PreviewTemplateUseCase {
            template_id: template.id.clone(),
            customer_name: Some("Ann".into()),
            service_name: None,
            staff_name: None,
            start_ts: None,
            amount_cents: None,
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(
            res.body,
            "Hi Ann, Sample Service at Glow Salon costs $35.00"
        );
        assert_eq!(res.subject.as_deref(), Some("Booking BK-SAMPLE"));
    }
}
