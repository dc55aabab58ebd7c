use mailhorn_domain::Customer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDTO {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerDTO {
    pub fn new(customer: &Customer) -> Self {
        Self {
            id: customer.id.as_string(),
            tenant_id: customer.tenant_id.as_string(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
        }
    }
}
