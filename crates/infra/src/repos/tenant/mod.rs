mod inmemory;
mod postgres;

pub use inmemory::InMemoryTenantRepo;
use mailhorn_domain::{Tenant, ID};
pub use postgres::PostgresTenantRepo;

#[async_trait::async_trait]
pub trait ITenantRepo: Send + Sync {
    async fn insert(&self, tenant: &Tenant) -> anyhow::Result<()>;
    async fn save(&self, tenant: &Tenant) -> anyhow::Result<()>;
    async fn find(&self, tenant_id: &ID) -> Option<Tenant>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_inserts_and_finds_tenants() {
        let repo = InMemoryTenantRepo::new();
        let tenant = Tenant::new("Bangs & Fringes");
        repo.insert(&tenant).await.unwrap();

        let found = repo.find(&tenant.id).await.expect("To find tenant");
        assert_eq!(found.id, tenant.id);
        assert_eq!(found.name, "Bangs & Fringes");
        assert!(repo.find(&ID::new()).await.is_none());
    }

    #[tokio::test]
    async fn it_saves_tenant_changes() {
        let repo = InMemoryTenantRepo::new();
        let mut tenant = Tenant::new("Bangs & Fringes");
        repo.insert(&tenant).await.unwrap();

        tenant.settings.notifications_enabled = false;
        repo.save(&tenant).await.unwrap();

        let found = repo.find(&tenant.id).await.unwrap();
        assert!(!found.settings.notifications_enabled);
    }
}
