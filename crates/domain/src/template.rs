use crate::channel::Channel;
use crate::shared::entity::{Entity, ID};
use crate::trigger::Trigger;

/// A tenant authored message template for one (trigger, channel)
/// combination. The body may contain `${namespace.field}` placeholders
/// which are substituted at emission time.
///
/// Several templates may exist for the same (trigger, channel); the
/// *effective* one is the most recently created template that is
/// enabled and not deleted. The dispatch engine never mutates
/// templates, it only reads them.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    pub id: ID,
    pub tenant_id: ID,
    pub trigger: Trigger,
    pub channel: Channel,
    /// Display name used by authoring tooling
    pub name: String,
    /// Only meaningful for the email channel
    pub subject: Option<String>,
    pub body: String,
    pub enabled: bool,
    /// Soft delete marker, deleted templates are kept for traceability
    pub deleted: bool,
    pub created: i64,
    pub updated: i64,
}

impl MessageTemplate {
    pub fn new(
        tenant_id: ID,
        trigger: Trigger,
        channel: Channel,
        name: &str,
        body: &str,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            tenant_id,
            trigger,
            channel,
            name: name.to_string(),
            subject: None,
            body: body.to_string(),
            enabled: true,
            deleted: false,
            created: now,
            updated: now,
        }
    }

    pub fn is_effective(&self) -> bool {
        self.enabled && !self.deleted
    }
}

impl Entity for MessageTemplate {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn disabled_or_deleted_templates_are_not_effective() {
        let mut template = MessageTemplate::new(
            Default::default(),
            Trigger::BookingCreated,
            Channel::Email,
            "Booking confirmation",
            "Hi ${customer.name}",
            0,
        );
        assert!(template.is_effective());

        template.enabled = false;
        assert!(!template.is_effective());

        template.enabled = true;
        template.deleted = true;
        assert!(!template.is_effective());
    }
}
