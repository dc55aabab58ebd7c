use mailhorn_domain::Booking;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDTO {
    pub id: String,
    pub tenant_id: String,
    pub customer_id: String,
    pub service_name: String,
    pub service_duration_min: i64,
    pub service_price_cents: i64,
    pub staff_name: Option<String>,
    pub start_ts: i64,
    pub end_ts: i64,
    pub reference: String,
}

impl BookingDTO {
    pub fn new(booking: &Booking) -> Self {
        Self {
            id: booking.id.as_string(),
            tenant_id: booking.tenant_id.as_string(),
            customer_id: booking.customer_id.as_string(),
            service_name: booking.service_name.clone(),
            service_duration_min: booking.service_duration_min,
            service_price_cents: booking.service_price_cents,
            staff_name: booking.staff_name.clone(),
            start_ts: booking.start_ts,
            end_ts: booking.end_ts,
            reference: booking.reference.clone(),
        }
    }
}
