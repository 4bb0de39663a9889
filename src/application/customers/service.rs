use std::sync::Arc;

use tracing::info;

use crate::domain::booking::{Booking, BookingFilter};
use crate::domain::customer::{Customer, CustomerDetails, CustomerQuery};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{PageRequest, PaginatedResult};

pub struct CustomerService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CustomerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, details: CustomerDetails) -> DomainResult<Customer> {
        details.validate()?;
        let customer = self.repos.customers().create(details).await?;
        info!(customer_id = customer.id, "Customer registered");
        Ok(customer)
    }

    pub async fn get(&self, id: i32) -> DomainResult<Customer> {
        self.repos
            .customers()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", "id", id))
    }

    pub async fn update(&self, id: i32, details: CustomerDetails) -> DomainResult<Customer> {
        details.validate()?;
        self.repos
            .customers()
            .update(id, details)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", "id", id))
    }

    pub async fn list(&self, query: CustomerQuery) -> DomainResult<PaginatedResult<Customer>> {
        self.repos.customers().find_all(query).await
    }

    /// Booking history of a customer, newest stay first
    pub async fn bookings(&self, id: i32, page: PageRequest) -> DomainResult<PaginatedResult<Booking>> {
        self.get(id).await?;
        self.repos
            .bookings()
            .find_all(BookingFilter {
                customer_id: Some(id),
                page,
                ..Default::default()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::EmergencyContact;
    use crate::infrastructure::database::test_support::memory_repos;

    fn details(first: &str, last: &str, email: &str) -> CustomerDetails {
        CustomerDetails {
            first_name: first.into(),
            last_name: last.into(),
            email: Some(email.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn search_and_paginate() {
        let svc = CustomerService::new(memory_repos().await);
        svc.create(details("Ada", "Lovelace", "ada@example.com")).await.unwrap();
        svc.create(details("Alan", "Turing", "alan@example.com")).await.unwrap();
        svc.create(details("Edsger", "Dijkstra", "ewd@example.org")).await.unwrap();

        let found = svc
            .list(CustomerQuery {
                search: Some("example.com".into()),
                page: PageRequest::new(Some(1), Some(1)),
            })
            .await
            .unwrap();
        assert_eq!(found.total, 2);
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.total_pages, 2);

        let all = svc.list(CustomerQuery::default()).await.unwrap();
        assert_eq!(all.total, 3);
        // Sorted by last name
        assert_eq!(all.items[0].last_name, "Dijkstra");
    }

    #[tokio::test]
    async fn emergency_contact_round_trips_and_names_required() {
        let svc = CustomerService::new(memory_repos().await);
        let mut d = details("Ada", "Lovelace", "ada@example.com");
        d.emergency_contact = Some(EmergencyContact {
            name: "Charles Babbage".into(),
            phone: "+44-1".into(),
        });
        let c = svc.create(d).await.unwrap();
        let stored = svc.get(c.id).await.unwrap();
        assert_eq!(
            stored.emergency_contact.map(|e| e.name).as_deref(),
            Some("Charles Babbage")
        );

        assert!(matches!(
            svc.create(details("", "Nobody", "x@example.com")).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.update(999, details("A", "B", "c@example.com")).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
