use crate::dtos::TenantDTO;
use mailhorn_domain::{Tenant, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantResponse {
    pub tenant: TenantDTO,
}

impl TenantResponse {
    pub fn new(tenant: Tenant) -> Self {
        Self {
            tenant: TenantDTO::new(&tenant),
        }
    }
}

pub mod create_tenant {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub timezone: Option<String>,
        pub currency: Option<String>,
        pub contact_email: Option<String>,
        pub contact_phone: Option<String>,
        pub notifications_enabled: Option<bool>,
    }

    pub type APIResponse = TenantResponse;
}

pub mod get_tenant {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub tenant_id: ID,
    }

    pub type APIResponse = TenantResponse;
}
