use async_trait::async_trait;

use super::model::{Customer, CustomerDetails, CustomerQuery};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, details: CustomerDetails) -> DomainResult<Customer>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>>;

    async fn update(&self, id: i32, details: CustomerDetails) -> DomainResult<Option<Customer>>;

    async fn find_all(&self, query: CustomerQuery) -> DomainResult<PaginatedResult<Customer>>;
}
