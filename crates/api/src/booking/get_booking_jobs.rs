use actix_web::{web, HttpResponse};
use mailhorn_api_structs::get_booking_jobs::*;
use mailhorn_domain::{NotificationJob, ID};
use mailhorn_infra::MailhornContext;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn get_booking_jobs_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = GetBookingJobsUseCase {
        booking_id: path.booking_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|jobs| HttpResponse::Ok().json(APIResponse::new(jobs)))
        .map_err(MailhornError::from)
}

#[derive(Debug)]
struct GetBookingJobsUseCase {
    pub booking_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    BookingNotFound(ID),
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::BookingNotFound(booking_id) => Self::NotFound(format!(
                "The booking with id: {}, was not found.",
                booking_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetBookingJobsUseCase {
    type Response = Vec<NotificationJob>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetBookingJobs";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.bookings.find(&self.booking_id).await.is_none() {
            return Err(UseCaseError::BookingNotFound(self.booking_id.clone()));
        }
        Ok(ctx.repos.jobs.find_by_booking(&self.booking_id).await)
    }
}
