mod booking;
mod customer;
mod job;
mod shared;
mod template;
mod tenant;

use std::sync::Arc;

use booking::{IBookingRepo, InMemoryBookingRepo, PostgresBookingRepo};
use customer::{ICustomerRepo, InMemoryCustomerRepo, PostgresCustomerRepo};
use job::{IJobRepo, InMemoryJobRepo, PostgresJobRepo};
use sqlx::postgres::PgPoolOptions;
use template::{ITemplateRepo, InMemoryTemplateRepo, PostgresTemplateRepo};
use tenant::{ITenantRepo, InMemoryTenantRepo, PostgresTenantRepo};
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub tenants: Arc<dyn ITenantRepo>,
    pub customers: Arc<dyn ICustomerRepo>,
    pub bookings: Arc<dyn IBookingRepo>,
    pub templates: Arc<dyn ITemplateRepo>,
    pub jobs: Arc<dyn IJobRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            tenants: Arc::new(PostgresTenantRepo::new(pool.clone())),
            customers: Arc::new(PostgresCustomerRepo::new(pool.clone())),
            bookings: Arc::new(PostgresBookingRepo::new(pool.clone())),
            templates: Arc::new(PostgresTemplateRepo::new(pool.clone())),
            jobs: Arc::new(PostgresJobRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            tenants: Arc::new(InMemoryTenantRepo::new()),
            customers: Arc::new(InMemoryCustomerRepo::new()),
            bookings: Arc::new(InMemoryBookingRepo::new()),
            templates: Arc::new(InMemoryTemplateRepo::new()),
            jobs: Arc::new(InMemoryJobRepo::new()),
        }
    }
}
