use actix_web::{web, HttpResponse};
use chrono_tz::Tz;
use mailhorn_api_structs::create_tenant::*;
use mailhorn_domain::Tenant;
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn create_tenant_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = CreateTenantUseCase {
        name: body.0.name,
        timezone: body.0.timezone,
        currency: body.0.currency,
        contact_email: body.0.contact_email,
        contact_phone: body.0.contact_phone,
        notifications_enabled: body.0.notifications_enabled,
    };

    execute(usecase, &ctx)
        .await
        .map(|tenant| HttpResponse::Created().json(APIResponse::new(tenant)))
        .map_err(MailhornError::from)
}

#[derive(Debug)]
struct CreateTenantUseCase {
    pub name: String,
    pub timezone: Option<String>,
    pub currency: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub notifications_enabled: Option<bool>,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidTimezone(String),
    StorageError,
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTimezone(tz) => Self::BadClientData(format!(
                "Invalid timezone: {}. It should be a valid IANA TimeZone.",
                tz
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTenantUseCase {
    type Response = Tenant;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateTenant";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        let mut tenant = Tenant::new(&self.name);
        if let Some(tzid) = &self.timezone {
            tenant.timezone = tzid
                .parse::<Tz>()
                .map_err(|_| UseCaseError::InvalidTimezone(tzid.clone()))?;
        }
        if let Some(currency) = &self.currency {
            tenant.currency = currency.to_uppercase();
        }
        tenant.contact_email = self.contact_email.clone();
        tenant.contact_phone = self.contact_phone.clone();
        if let Some(enabled) = self.notifications_enabled {
            tenant.settings.notifications_enabled = enabled;
        }

        ctx.repos
            .tenants
            .insert(&tenant)
            .await
            .map(|_| tenant)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailhorn_infra::setup_context_inmemory;

    #[actix_web::test]
    async fn creates_tenant_with_defaults() {
        let ctx = setup_context_inmemory();
        let usecase = CreateTenantUseCase {
            name: "Glow Salon".into(),
            timezone: None,
            currency: None,
            contact_email: None,
            contact_phone: None,
            notifications_enabled: None,
        };
        let tenant = execute(usecase, &ctx).await.unwrap();
        assert_eq!(tenant.timezone, chrono_tz::UTC);
        assert_eq!(tenant.currency, "USD");
        assert!(tenant.settings.notifications_enabled);
        assert!(ctx.repos.tenants.find(&tenant.id).await.is_some());
    }

    #[actix_web::test]
    async fn rejects_invalid_timezone() {
        let ctx = setup_context_inmemory();
        let usecase = CreateTenantUseCase {
            name: "Glow Salon".into(),
            timezone: Some("Europe/Atlantis".into()),
            currency: None,
            contact_email: None,
            contact_phone: None,
            notifications_enabled: None,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidTimezone(_))
        ));
    }
}
