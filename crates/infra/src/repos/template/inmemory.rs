use super::ITemplateRepo;
use crate::repos::shared::inmemory_repo::*;
use mailhorn_domain::{Channel, MessageTemplate, Trigger, ID};
use std::sync::Mutex;

pub struct InMemoryTemplateRepo {
    templates: Mutex<Vec<MessageTemplate>>,
}

impl InMemoryTemplateRepo {
    pub fn new() -> Self {
        Self {
            templates: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ITemplateRepo for InMemoryTemplateRepo {
    async fn insert(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        insert(template, &self.templates);
        Ok(())
    }

    async fn save(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        save(template, &self.templates);
        Ok(())
    }

    async fn find(&self, template_id: &ID) -> Option<MessageTemplate> {
        find(template_id, &self.templates)
    }

    async fn find_effective(
        &self,
        tenant_id: &ID,
        trigger: Trigger,
        channel: Channel,
    ) -> Option<MessageTemplate> {
        find_by(&self.templates, |t: &MessageTemplate| {
            t.tenant_id == *tenant_id
                && t.trigger == trigger
                && t.channel == channel
                && t.is_effective()
        })
        .into_iter()
        .max_by_key(|t| t.created)
    }

    async fn find_by_tenant(
        &self,
        tenant_id: &ID,
        trigger: Option<Trigger>,
        channel: Option<Channel>,
    ) -> Vec<MessageTemplate> {
        find_by(&self.templates, |t: &MessageTemplate| {
            t.tenant_id == *tenant_id
                && !t.deleted
                && trigger.map(|tr| t.trigger == tr).unwrap_or(true)
                && channel.map(|c| t.channel == c).unwrap_or(true)
        })
    }
}
