mod inmemory;
mod postgres;

pub use inmemory::InMemoryBookingRepo;
use mailhorn_domain::{Booking, ID};
pub use postgres::PostgresBookingRepo;

#[async_trait::async_trait]
pub trait IBookingRepo: Send + Sync {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()>;
    async fn find(&self, booking_id: &ID) -> Option<Booking>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking_factory(tenant_id: &ID, customer_id: &ID) -> Booking {
        Booking {
            id: Default::default(),
            tenant_id: tenant_id.clone(),
            customer_id: customer_id.clone(),
            service_name: "Haircut".into(),
            service_duration_min: 45,
            service_price_cents: 3500,
            staff_name: Some("Maya".into()),
            start_ts: 1000,
            end_ts: 1000 + 45 * 60 * 1000,
            reference: Booking::generate_reference(),
            created: 0,
            updated: 0,
        }
    }

    #[tokio::test]
    async fn it_inserts_and_finds_bookings() {
        let repo = InMemoryBookingRepo::new();
        let booking = booking_factory(&ID::new(), &ID::new());
        repo.insert(&booking).await.unwrap();

        let found = repo.find(&booking.id).await.expect("To find booking");
        assert_eq!(found.reference, booking.reference);
        assert_eq!(found.service_price_cents, 3500);
    }
}
