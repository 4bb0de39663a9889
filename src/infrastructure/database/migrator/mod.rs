//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_hotels;
mod m20240101_000002_create_room_types;
mod m20240101_000003_create_rooms;
mod m20240101_000004_create_customers;
mod m20240101_000005_create_users;
mod m20240101_000006_create_bookings;
mod m20240101_000007_create_check_ins;
mod m20240101_000008_create_check_outs;
mod m20240101_000009_create_payments;
mod m20240101_000010_create_password_resets;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_hotels::Migration),
            Box::new(m20240101_000002_create_room_types::Migration),
            Box::new(m20240101_000003_create_rooms::Migration),
            Box::new(m20240101_000004_create_customers::Migration),
            Box::new(m20240101_000005_create_users::Migration),
            Box::new(m20240101_000006_create_bookings::Migration),
            Box::new(m20240101_000007_create_check_ins::Migration),
            Box::new(m20240101_000008_create_check_outs::Migration),
            Box::new(m20240101_000009_create_payments::Migration),
            Box::new(m20240101_000010_create_password_resets::Migration),
        ]
    }
}
