mod inmemory;
mod postgres;

pub use inmemory::InMemoryTemplateRepo;
use mailhorn_domain::{Channel, MessageTemplate, Trigger, ID};
pub use postgres::PostgresTemplateRepo;

#[async_trait::async_trait]
pub trait ITemplateRepo: Send + Sync {
    async fn insert(&self, template: &MessageTemplate) -> anyhow::Result<()>;
    async fn save(&self, template: &MessageTemplate) -> anyhow::Result<()>;
    async fn find(&self, template_id: &ID) -> Option<MessageTemplate>;
    /// The single template used for a (tenant, trigger, channel)
    /// combination: enabled, not deleted, most recently created wins.
    async fn find_effective(
        &self,
        tenant_id: &ID,
        trigger: Trigger,
        channel: Channel,
    ) -> Option<MessageTemplate>;
    /// Authoring surface: all non deleted templates for a tenant,
    /// optionally narrowed to a trigger and/or channel.
    async fn find_by_tenant(
        &self,
        tenant_id: &ID,
        trigger: Option<Trigger>,
        channel: Option<Channel>,
    ) -> Vec<MessageTemplate>;
}
