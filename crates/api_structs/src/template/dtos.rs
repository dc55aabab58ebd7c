use mailhorn_domain::{Channel, MessageTemplate, Trigger};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplateDTO {
    pub id: String,
    pub tenant_id: String,
    pub trigger: Trigger,
    pub channel: Channel,
    pub name: String,
    pub subject: Option<String>,
    pub body: String,
    pub enabled: bool,
    pub created: i64,
    pub updated: i64,
}

impl MessageTemplateDTO {
    pub fn new(template: &MessageTemplate) -> Self {
        Self {
            id: template.id.as_string(),
            tenant_id: template.tenant_id.as_string(),
            trigger: template.trigger,
            channel: template.channel,
            name: template.name.clone(),
            subject: template.subject.clone(),
            body: template.body.clone(),
            enabled: template.enabled,
            created: template.created,
            updated: template.updated,
        }
    }
}
