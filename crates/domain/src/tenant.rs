use crate::shared::entity::{Entity, ID};
use chrono_tz::Tz;

/// A `Tenant` is the business that owns templates, customers and
/// bookings. Each tenant renders messages in its own timezone and
/// currency and can turn notifications off entirely.
#[derive(Debug, Clone)]
pub struct Tenant {
    pub id: ID,
    pub name: String,
    /// Shown to customers as the business contact address and usable
    /// in templates through `${business.email}`
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    /// Timezone used when formatting appointment times in messages
    pub timezone: Tz,
    /// ISO 4217 currency code used when formatting money amounts
    pub currency: String,
    pub settings: TenantSettings,
}

#[derive(Debug, Clone)]
pub struct TenantSettings {
    /// When false the emission engine produces no jobs for this
    /// tenant, for any trigger or channel
    pub notifications_enabled: bool,
}

impl Default for TenantSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
        }
    }
}

impl Tenant {
    pub fn new(name: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.to_string(),
            contact_email: None,
            contact_phone: None,
            timezone: Tz::UTC,
            currency: "USD".into(),
            settings: Default::default(),
        }
    }
}

impl Entity for Tenant {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_tenant_with_sane_defaults() {
        let tenant = Tenant::new("Bangs & Fringes");
        assert_eq!(tenant.timezone, Tz::UTC);
        assert_eq!(tenant.currency, "USD");
        assert!(tenant.settings.notifications_enabled);
    }
}
