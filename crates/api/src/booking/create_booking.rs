use actix_web::{web, HttpResponse};
use mailhorn_api_structs::create_booking::*;
use mailhorn_domain::{Booking, ID};
use mailhorn_infra::MailhornContext;

use super::subscribers::EmitNotificationsOnBookingCreated;
use crate::error::MailhornError;
use crate::shared::usecase::{execute, Subscriber, UseCase};

const MILLIS_PER_MINUTE: i64 = 60 * 1000;

pub async fn create_booking_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = CreateBookingUseCase {
        tenant_id: body.0.tenant_id,
        customer_id: body.0.customer_id,
        service_name: body.0.service_name,
        service_duration_min: body.0.service_duration_min,
        service_price_cents: body.0.service_price_cents,
        staff_name: body.0.staff_name,
        start_ts: body.0.start_ts,
        end_ts: body.0.end_ts,
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Created().json(APIResponse::new(booking)))
        .map_err(MailhornError::from)
}

#[derive(Debug)]
pub(crate) struct CreateBookingUseCase {
    pub tenant_id: ID,
    pub customer_id: ID,
    pub service_name: String,
    pub service_duration_min: i64,
    pub service_price_cents: i64,
    pub staff_name: Option<String>,
    pub start_ts: i64,
    pub end_ts: Option<i64>,
}

#[derive(Debug)]
pub(crate) enum UseCaseError {
    TenantNotFound(ID),
    CustomerNotFound(ID),
    InvalidServiceSnapshot(String),
    InvalidTimes(String),
    StorageError,
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::TenantNotFound(tenant_id) => {
                Self::NotFound(format!("The tenant with id: {}, was not found.", tenant_id))
            }
            UseCaseError::CustomerNotFound(customer_id) => Self::NotFound(format!(
                "The customer with id: {}, was not found.",
                customer_id
            )),
            UseCaseError::InvalidServiceSnapshot(msg) => Self::BadClientData(msg),
            UseCaseError::InvalidTimes(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateBookingUseCase {
    type Response = Booking;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateBooking";

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(EmitNotificationsOnBookingCreated)]
    }

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.tenants.find(&self.tenant_id).await.is_none() {
            return Err(UseCaseError::TenantNotFound(self.tenant_id.clone()));
        }
        let customer = ctx
            .repos
            .customers
            .find(&self.customer_id)
            .await
            .filter(|c| c.tenant_id == self.tenant_id)
            .ok_or_else(|| UseCaseError::CustomerNotFound(self.customer_id.clone()))?;

        if self.service_name.trim().is_empty() {
            return Err(UseCaseError::InvalidServiceSnapshot(
                "Service name cannot be empty.".into(),
            ));
        }
        if self.service_duration_min <= 0 {
            return Err(UseCaseError::InvalidServiceSnapshot(format!(
                "Invalid service duration: {} minutes.",
                self.service_duration_min
            )));
        }
        if self.service_price_cents < 0 {
            return Err(UseCaseError::InvalidServiceSnapshot(format!(
                "Invalid service price: {} cents.",
                self.service_price_cents
            )));
        }

        let end_ts = self
            .end_ts
            .unwrap_or(self.start_ts + self.service_duration_min * MILLIS_PER_MINUTE);
        if end_ts <= self.start_ts {
            return Err(UseCaseError::InvalidTimes(format!(
                "Booking end: {} must be after booking start: {}.",
                end_ts, self.start_ts
            )));
        }

        let now = ctx.sys.get_timestamp_millis();
        let booking = Booking {
            id: Default::default(),
            tenant_id: self.tenant_id.clone(),
            customer_id: customer.id,
            service_name: self.service_name.clone(),
            service_duration_min: self.service_duration_min,
            service_price_cents: self.service_price_cents,
            staff_name: self.staff_name.clone(),
            start_ts: self.start_ts,
            end_ts,
            reference: Booking::generate_reference(),
            created: now,
            updated: now,
        };

        ctx.repos
            .bookings
            .insert(&booking)
            .await
            .map(|_| booking)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateBookingUseCase> for EmitNotificationsOnBookingCreated {
    async fn notify(&self, booking: &Booking, ctx: &MailhornContext) {
        self.emit_for_booking(booking, ctx).await;
    }
}
