use super::ITemplateRepo;
use mailhorn_domain::{Channel, MessageTemplate, Trigger, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresTemplateRepo {
    pool: PgPool,
}

impl PostgresTemplateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TemplateRaw {
    template_uid: Uuid,
    tenant_uid: Uuid,
    trigger: String,
    channel: String,
    name: String,
    subject: Option<String>,
    body: String,
    enabled: bool,
    deleted: bool,
    created: i64,
    updated: i64,
}

impl TryFrom<TemplateRaw> for MessageTemplate {
    type Error = anyhow::Error;

    fn try_from(raw: TemplateRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.template_uid.into(),
            tenant_id: raw.tenant_uid.into(),
            trigger: raw.trigger.parse::<Trigger>()?,
            channel: raw.channel.parse::<Channel>()?,
            name: raw.name,
            subject: raw.subject,
            body: raw.body,
            enabled: raw.enabled,
            deleted: raw.deleted,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

#[async_trait::async_trait]
impl ITemplateRepo for PostgresTemplateRepo {
    async fn insert(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO message_templates
            (template_uid, tenant_uid, trigger, channel, name, subject, body,
             enabled, deleted, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(template.id.inner_ref())
        .bind(template.tenant_id.inner_ref())
        .bind(template.trigger.as_str())
        .bind(template.channel.as_str())
        .bind(&template.name)
        .bind(&template.subject)
        .bind(&template.body)
        .bind(template.enabled)
        .bind(template.deleted)
        .bind(template.created)
        .bind(template.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE message_templates SET
                name = $2,
                subject = $3,
                body = $4,
                enabled = $5,
                deleted = $6,
                updated = $7
            WHERE template_uid = $1
            "#,
        )
        .bind(template.id.inner_ref())
        .bind(&template.name)
        .bind(&template.subject)
        .bind(&template.body)
        .bind(template.enabled)
        .bind(template.deleted)
        .bind(template.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, template_id: &ID) -> Option<MessageTemplate> {
        sqlx::query_as::<_, TemplateRaw>(
            r#"
            SELECT * FROM message_templates
            WHERE template_uid = $1
            "#,
        )
        .bind(template_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .and_then(|raw| raw.try_into().ok())
    }

    async fn find_effective(
        &self,
        tenant_id: &ID,
        trigger: Trigger,
        channel: Channel,
    ) -> Option<MessageTemplate> {
        sqlx::query_as::<_, TemplateRaw>(
            r#"
            SELECT * FROM message_templates
            WHERE tenant_uid = $1 AND trigger = $2 AND channel = $3
                AND enabled AND NOT deleted
            ORDER BY created DESC
            LIMIT 1
            "#,
        )
        .bind(tenant_id.inner_ref())
        .bind(trigger.as_str())
        .bind(channel.as_str())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .and_then(|raw| raw.try_into().ok())
    }

    async fn find_by_tenant(
        &self,
        tenant_id: &ID,
        trigger: Option<Trigger>,
        channel: Option<Channel>,
    ) -> Vec<MessageTemplate> {
        sqlx::query_as::<_, TemplateRaw>(
            r#"
            SELECT * FROM message_templates
            WHERE tenant_uid = $1 AND NOT deleted
                AND ($2::text IS NULL OR trigger = $2)
                AND ($3::text IS NULL OR channel = $3)
            ORDER BY created DESC
            "#,
        )
        .bind(tenant_id.inner_ref())
        .bind(trigger.map(|t| t.as_str()))
        .bind(channel.map(|c| c.as_str()))
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .filter_map(|raw| raw.try_into().ok())
        .collect()
    }
}
