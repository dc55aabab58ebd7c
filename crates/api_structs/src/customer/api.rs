use crate::dtos::CustomerDTO;
use mailhorn_domain::{Customer, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub customer: CustomerDTO,
}

impl CustomerResponse {
    pub fn new(customer: Customer) -> Self {
        Self {
            customer: CustomerDTO::new(&customer),
        }
    }
}

pub mod create_customer {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub tenant_id: ID,
        pub name: String,
        pub email: Option<String>,
        pub phone: Option<String>,
    }

    pub type APIResponse = CustomerResponse;
}
