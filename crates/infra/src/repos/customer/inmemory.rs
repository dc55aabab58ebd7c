use super::ICustomerRepo;
use crate::repos::shared::inmemory_repo::*;
use mailhorn_domain::{Customer, ID};
use std::sync::Mutex;

pub struct InMemoryCustomerRepo {
    customers: Mutex<Vec<Customer>>,
}

impl InMemoryCustomerRepo {
    pub fn new() -> Self {
        Self {
            customers: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICustomerRepo for InMemoryCustomerRepo {
    async fn insert(&self, customer: &Customer) -> anyhow::Result<()> {
        insert(customer, &self.customers);
        Ok(())
    }

    async fn find(&self, customer_id: &ID) -> Option<Customer> {
        find(customer_id, &self.customers)
    }
}
