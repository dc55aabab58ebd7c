use mailhorn_domain::Tenant;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDTO {
    pub id: String,
    pub name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub timezone: String,
    pub currency: String,
    pub notifications_enabled: bool,
}

impl TenantDTO {
    pub fn new(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id.as_string(),
            name: tenant.name.clone(),
            contact_email: tenant.contact_email.clone(),
            contact_phone: tenant.contact_phone.clone(),
            timezone: tenant.timezone.to_string(),
            currency: tenant.currency.clone(),
            notifications_enabled: tenant.settings.notifications_enabled,
        }
    }
}
