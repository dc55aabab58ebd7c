use super::ITenantRepo;
use chrono_tz::Tz;
use mailhorn_domain::{Tenant, TenantSettings, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresTenantRepo {
    pool: PgPool,
}

impl PostgresTenantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TenantRaw {
    tenant_uid: Uuid,
    name: String,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    timezone: String,
    currency: String,
    notifications_enabled: bool,
}

impl From<TenantRaw> for Tenant {
    fn from(raw: TenantRaw) -> Self {
        Self {
            id: raw.tenant_uid.into(),
            name: raw.name,
            contact_email: raw.contact_email,
            contact_phone: raw.contact_phone,
            timezone: raw.timezone.parse().unwrap_or(Tz::UTC),
            currency: raw.currency,
            settings: TenantSettings {
                notifications_enabled: raw.notifications_enabled,
            },
        }
    }
}

#[async_trait::async_trait]
impl ITenantRepo for PostgresTenantRepo {
    async fn insert(&self, tenant: &Tenant) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tenants
            (tenant_uid, name, contact_email, contact_phone, timezone, currency, notifications_enabled)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(tenant.id.inner_ref())
        .bind(&tenant.name)
        .bind(&tenant.contact_email)
        .bind(&tenant.contact_phone)
        .bind(tenant.timezone.to_string())
        .bind(&tenant.currency)
        .bind(tenant.settings.notifications_enabled)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, tenant: &Tenant) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE tenants SET
                name = $2,
                contact_email = $3,
                contact_phone = $4,
                timezone = $5,
                currency = $6,
                notifications_enabled = $7
            WHERE tenant_uid = $1
            "#,
        )
        .bind(tenant.id.inner_ref())
        .bind(&tenant.name)
        .bind(&tenant.contact_email)
        .bind(&tenant.contact_phone)
        .bind(tenant.timezone.to_string())
        .bind(&tenant.currency)
        .bind(tenant.settings.notifications_enabled)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, tenant_id: &ID) -> Option<Tenant> {
        sqlx::query_as::<_, TenantRaw>(
            r#"
            SELECT * FROM tenants
            WHERE tenant_uid = $1
            "#,
        )
        .bind(tenant_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }
}
