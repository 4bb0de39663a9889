//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::db_err;
use crate::domain::customer::{
    Customer, CustomerDetails, CustomerQuery, CustomerRepository, EmergencyContact,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::customer;
use crate::shared::PaginatedResult;

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: customer::Model) -> Customer {
    let emergency_contact = match (m.emergency_contact_name, m.emergency_contact_phone) {
        (Some(name), Some(phone)) => Some(EmergencyContact { name, phone }),
        _ => None,
    };
    Customer {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
        phone: m.phone,
        id_document: m.id_document,
        address: m.address,
        emergency_contact,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn split_contact(c: Option<EmergencyContact>) -> (Option<String>, Option<String>) {
    match c {
        Some(c) => (Some(c.name), Some(c.phone)),
        None => (None, None),
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn create(&self, d: CustomerDetails) -> DomainResult<Customer> {
        debug!("Creating customer: {} {}", d.first_name, d.last_name);
        let now = Utc::now();
        let (ec_name, ec_phone) = split_contact(d.emergency_contact);

        let model = customer::ActiveModel {
            id: NotSet,
            first_name: Set(d.first_name),
            last_name: Set(d.last_name),
            email: Set(d.email),
            phone: Set(d.phone),
            id_document: Set(d.id_document),
            address: Set(d.address),
            emergency_contact_name: Set(ec_name),
            emergency_contact_phone: Set(ec_phone),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, id: i32, d: CustomerDetails) -> DomainResult<Option<Customer>> {
        let Some(existing) = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let (ec_name, ec_phone) = split_contact(d.emergency_contact);
        let mut active: customer::ActiveModel = existing.into();
        active.first_name = Set(d.first_name);
        active.last_name = Set(d.last_name);
        active.email = Set(d.email);
        active.phone = Set(d.phone);
        active.id_document = Set(d.id_document);
        active.address = Set(d.address);
        active.emergency_contact_name = Set(ec_name);
        active.emergency_contact_phone = Set(ec_phone);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn find_all(&self, q: CustomerQuery) -> DomainResult<PaginatedResult<Customer>> {
        let mut query = customer::Entity::find();

        if let Some(search) = q.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(customer::Column::FirstName.contains(search))
                    .add(customer::Column::LastName.contains(search))
                    .add(customer::Column::Email.contains(search))
                    .add(customer::Column::Phone.contains(search)),
            );
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let models = query
            .order_by_asc(customer::Column::LastName)
            .order_by_asc(customer::Column::FirstName)
            .offset(q.page.offset())
            .limit(q.page.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, q.page.page, q.page.page_size))
    }
}
