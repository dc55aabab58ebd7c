use crate::shared::entity::{Entity, ID};
use mailhorn_utils::create_reference_code;

const REFERENCE_LEN: usize = 8;

/// The minimal projection of a booking that the dispatch engine needs
/// to render messages. The service fields are a snapshot taken when
/// the booking was made so that later edits to the service catalog do
/// not rewrite already rendered history.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: ID,
    pub tenant_id: ID,
    pub customer_id: ID,
    pub service_name: String,
    pub service_duration_min: i64,
    /// Price in minor units (cents) of the tenant currency
    pub service_price_cents: i64,
    pub staff_name: Option<String>,
    /// Appointment start in millis since epoch, UTC
    pub start_ts: i64,
    pub end_ts: i64,
    /// Human readable code customers can quote, e.g. `BK-7F2K9QXA`
    pub reference: String,
    pub created: i64,
    pub updated: i64,
}

impl Booking {
    pub fn generate_reference() -> String {
        create_reference_code("BK", REFERENCE_LEN)
    }
}

impl Entity for Booking {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_generates_readable_references() {
        let reference = Booking::generate_reference();
        assert!(reference.starts_with("BK-"));
        assert_eq!(reference.len(), 3 + REFERENCE_LEN);
    }
}
