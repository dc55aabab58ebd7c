use super::ITenantRepo;
use crate::repos::shared::inmemory_repo::*;
use mailhorn_domain::{Tenant, ID};
use std::sync::Mutex;

pub struct InMemoryTenantRepo {
    tenants: Mutex<Vec<Tenant>>,
}

impl InMemoryTenantRepo {
    pub fn new() -> Self {
        Self {
            tenants: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ITenantRepo for InMemoryTenantRepo {
    async fn insert(&self, tenant: &Tenant) -> anyhow::Result<()> {
        insert(tenant, &self.tenants);
        Ok(())
    }

    async fn save(&self, tenant: &Tenant) -> anyhow::Result<()> {
        save(tenant, &self.tenants);
        Ok(())
    }

    async fn find(&self, tenant_id: &ID) -> Option<Tenant> {
        find(tenant_id, &self.tenants)
    }
}
