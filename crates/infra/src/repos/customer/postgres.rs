use super::ICustomerRepo;
use mailhorn_domain::{Customer, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresCustomerRepo {
    pool: PgPool,
}

impl PostgresCustomerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CustomerRaw {
    customer_uid: Uuid,
    tenant_uid: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
}

impl From<CustomerRaw> for Customer {
    fn from(raw: CustomerRaw) -> Self {
        Self {
            id: raw.customer_uid.into(),
            tenant_id: raw.tenant_uid.into(),
            name: raw.name,
            email: raw.email,
            phone: raw.phone,
        }
    }
}

#[async_trait::async_trait]
impl ICustomerRepo for PostgresCustomerRepo {
    async fn insert(&self, customer: &Customer) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers
            (customer_uid, tenant_uid, name, email, phone)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(customer.id.inner_ref())
        .bind(customer.tenant_id.inner_ref())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, customer_id: &ID) -> Option<Customer> {
        sqlx::query_as::<_, CustomerRaw>(
            r#"
            SELECT * FROM customers
            WHERE customer_uid = $1
            "#,
        )
        .bind(customer_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }
}
