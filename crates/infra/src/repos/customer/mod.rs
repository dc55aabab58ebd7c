mod inmemory;
mod postgres;

pub use inmemory::InMemoryCustomerRepo;
use mailhorn_domain::{Customer, ID};
pub use postgres::PostgresCustomerRepo;

#[async_trait::async_trait]
pub trait ICustomerRepo: Send + Sync {
    async fn insert(&self, customer: &Customer) -> anyhow::Result<()>;
    async fn find(&self, customer_id: &ID) -> Option<Customer>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_inserts_and_finds_customers() {
        let repo = InMemoryCustomerRepo::new();
        let mut customer = Customer::new(ID::new(), "Ann");
        customer.email = Some("ann@example.com".into());
        repo.insert(&customer).await.unwrap();

        let found = repo.find(&customer.id).await.expect("To find customer");
        assert_eq!(found.email.as_deref(), Some("ann@example.com"));
        assert!(found.phone.is_none());
    }
}
