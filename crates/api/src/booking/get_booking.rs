use actix_web::{web, HttpResponse};
use mailhorn_api_structs::get_booking::*;
use mailhorn_domain::{Booking, ID};
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn get_booking_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = GetBookingUseCase {
        booking_id: path.booking_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Ok().json(APIResponse::new(booking)))
        .map_err(MailhornError::from)
}

#[derive(Debug)]
struct GetBookingUseCase {
    pub booking_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(booking_id) => Self::NotFound(format!(
                "The booking with id: {}, was not found.",
                booking_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetBookingUseCase {
    type Response = Booking;

    type Error = UseCaseError;

    const NAME: &'static str = "GetBooking";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .bookings
            .find(&self.booking_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.booking_id.clone()))
    }
}
