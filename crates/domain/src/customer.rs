use crate::shared::entity::{Entity, ID};

/// The recipient of notifications. A customer without any contact
/// information is perfectly valid, it just means no channel can be
/// used for them.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: ID,
    pub tenant_id: ID,
    pub name: String,
    pub email: Option<String>,
    /// Phone number, E.164 when created through the API. Emission
    /// normalizes again and skips the sms channel when that fails.
    pub phone: Option<String>,
}

impl Customer {
    pub fn new(tenant_id: ID, name: &str) -> Self {
        Self {
            id: Default::default(),
            tenant_id,
            name: name.to_string(),
            email: None,
            phone: None,
        }
    }
}

impl Entity for Customer {
    fn id(&self) -> &ID {
        &self.id
    }
}
