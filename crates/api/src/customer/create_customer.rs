use actix_web::{web, HttpResponse};
use mailhorn_api_structs::create_customer::*;
use mailhorn_domain::{normalize_phone, Customer, ID};
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn create_customer_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = CreateCustomerUseCase {
        tenant_id: body.0.tenant_id,
        name: body.0.name,
        email: body.0.email,
        phone: body.0.phone,
    };

    execute(usecase, &ctx)
        .await
        .map(|customer| HttpResponse::Created().json(APIResponse::new(customer)))
        .map_err(MailhornError::from)
}

#[derive(Debug)]
struct CreateCustomerUseCase {
    pub tenant_id: ID,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug)]
enum UseCaseError {
    TenantNotFound(ID),
    InvalidPhone(String),
    StorageError,
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::TenantNotFound(tenant_id) => {
                Self::NotFound(format!("The tenant with id: {}, was not found.", tenant_id))
            }
            UseCaseError::InvalidPhone(phone) => Self::BadClientData(format!(
                "Invalid phone number: {}. It could not be normalized to E.164.",
                phone
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateCustomerUseCase {
    type Response = Customer;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateCustomer";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.tenants.find(&self.tenant_id).await.is_none() {
            return Err(UseCaseError::TenantNotFound(self.tenant_id.clone()));
        }

        let mut customer = Customer::new(self.tenant_id.clone(), &self.name);
        customer.email = self.email.clone();
        // Phone numbers are stored in E.164 so the dispatcher never
        // has to guess formats at delivery time
        if let Some(raw) = &self.phone {
            let normalized = normalize_phone(raw, &ctx.config.default_country_code)
                .ok_or_else(|| UseCaseError::InvalidPhone(raw.clone()))?;
            customer.phone = Some(normalized);
        }

        ctx.repos
            .customers
            .insert(&customer)
            .await
            .map(|_| customer)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailhorn_domain::Tenant;
    use mailhorn_infra::setup_context_inmemory;

    #[actix_web::test]
    async fn normalizes_phone_on_create() {
        let ctx = setup_context_inmemory();
        let tenant = Tenant::new("Glow Salon");
        ctx.repos.tenants.insert(&tenant).await.unwrap();

        let usecase = CreateCustomerUseCase {
            tenant_id: tenant.id.clone(),
            name: "Ann".into(),
            email: Some("ann@example.com".into()),
            phone: Some("(212) 555-0100".into()),
        };
        let customer = execute(usecase, &ctx).await.unwrap();
        assert_eq!(customer.phone.as_deref(), Some("+12125550100"));
    }

    #[actix_web::test]
    async fn rejects_unknown_tenant() {
        let ctx = setup_context_inmemory();
        let usecase = CreateCustomerUseCase {
            tenant_id: ID::new(),
            name: "Ann".into(),
            email: None,
            phone: None,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::TenantNotFound(_))
        ));
    }
}
