use crate::dtos::{BookingDTO, NotificationJobDTO};
use mailhorn_domain::{Booking, NotificationJob, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking: BookingDTO,
}

impl BookingResponse {
    pub fn new(booking: Booking) -> Self {
        Self {
            booking: BookingDTO::new(&booking),
        }
    }
}

pub mod create_booking {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub tenant_id: ID,
        pub customer_id: ID,
        pub service_name: String,
        pub service_duration_min: i64,
        pub service_price_cents: i64,
        pub staff_name: Option<String>,
        pub start_ts: i64,
        /// Defaults to `start_ts + service_duration_min` when omitted
        pub end_ts: Option<i64>,
    }

    pub type APIResponse = BookingResponse;
}

pub mod get_booking {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub booking_id: ID,
    }

    pub type APIResponse = BookingResponse;
}

pub mod get_booking_jobs {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub booking_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub jobs: Vec<NotificationJobDTO>,
    }

    impl APIResponse {
        pub fn new(jobs: Vec<NotificationJob>) -> Self {
            Self {
                jobs: jobs.iter().map(NotificationJobDTO::new).collect(),
            }
        }
    }
}
