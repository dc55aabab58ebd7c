use super::IBookingRepo;
use mailhorn_domain::{Booking, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BookingRaw {
    booking_uid: Uuid,
    tenant_uid: Uuid,
    customer_uid: Uuid,
    service_name: String,
    service_duration_min: i64,
    service_price_cents: i64,
    staff_name: Option<String>,
    start_ts: i64,
    end_ts: i64,
    reference: String,
    created: i64,
    updated: i64,
}

impl From<BookingRaw> for Booking {
    fn from(raw: BookingRaw) -> Self {
        Self {
            id: raw.booking_uid.into(),
            tenant_id: raw.tenant_uid.into(),
            customer_id: raw.customer_uid.into(),
            service_name: raw.service_name,
            service_duration_min: raw.service_duration_min,
            service_price_cents: raw.service_price_cents,
            staff_name: raw.staff_name,
            start_ts: raw.start_ts,
            end_ts: raw.end_ts,
            reference: raw.reference,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IBookingRepo for PostgresBookingRepo {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings
            (booking_uid, tenant_uid, customer_uid, service_name, service_duration_min,
             service_price_cents, staff_name, start_ts, end_ts, reference, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(booking.id.inner_ref())
        .bind(booking.tenant_id.inner_ref())
        .bind(booking.customer_id.inner_ref())
        .bind(&booking.service_name)
        .bind(booking.service_duration_min)
        .bind(booking.service_price_cents)
        .bind(&booking.staff_name)
        .bind(booking.start_ts)
        .bind(booking.end_ts)
        .bind(&booking.reference)
        .bind(booking.created)
        .bind(booking.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, booking_id: &ID) -> Option<Booking> {
        sqlx::query_as::<_, BookingRaw>(
            r#"
            SELECT * FROM bookings
            WHERE booking_uid = $1
            "#,
        )
        .bind(booking_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }
}
