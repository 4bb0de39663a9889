//! In-memory SQLite fixtures for repository and service tests

use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use super::migrator::Migrator;
use super::repositories::SeaOrmRepositoryProvider;
use crate::domain::customer::{Customer, CustomerDetails};
use crate::domain::hotel::{Hotel, HotelDetails, RoomType, RoomTypeDetails};
use crate::domain::room::{NewRoom, Room};
use crate::domain::{CreateUserDto, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::password::hash_password;

/// A single pooled connection keeps the in-memory database alive and shared.
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect sqlite memory");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub async fn memory_repos() -> Arc<SeaOrmRepositoryProvider> {
    Arc::new(SeaOrmRepositoryProvider::new(memory_db().await))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub const STAFF_PASSWORD: &str = "frontdesk-pass";

/// One hotel with a 2-guest room type at 10 000 per night, rooms 101 and 102,
/// one customer and one receptionist.
pub struct Fixture {
    pub repos: Arc<SeaOrmRepositoryProvider>,
    pub hotel: Hotel,
    pub room_type: RoomType,
    pub room_101: Room,
    pub room_102: Room,
    pub customer: Customer,
    pub staff: User,
}

pub async fn fixture() -> Fixture {
    let repos = memory_repos().await;

    let hotel = repos
        .hotels()
        .create(HotelDetails {
            name: "Test Hotel".into(),
            ..Default::default()
        })
        .await
        .expect("hotel");
    let room_type = repos
        .hotels()
        .create_room_type(
            hotel.id,
            RoomTypeDetails {
                name: "Double".into(),
                description: None,
                base_price: 10_000,
                capacity: 2,
            },
        )
        .await
        .expect("room type");

    let mut rooms = Vec::new();
    for number in ["101", "102"] {
        rooms.push(
            repos
                .rooms()
                .create(NewRoom {
                    hotel_id: hotel.id,
                    room_type_id: room_type.id,
                    number: number.into(),
                    floor: 1,
                })
                .await
                .expect("room"),
        );
    }
    let room_102 = rooms.pop().expect("room 102");
    let room_101 = rooms.pop().expect("room 101");

    let customer = repos
        .customers()
        .create(CustomerDetails {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: Some("grace@example.com".into()),
            ..Default::default()
        })
        .await
        .expect("customer");

    let staff = repos
        .users()
        .create_user(CreateUserDto {
            username: "frontdesk".into(),
            email: "frontdesk@example.com".into(),
            phone: None,
            role: UserRole::Receptionist,
            password_hash: hash_password(STAFF_PASSWORD).expect("hash"),
        })
        .await
        .expect("staff");

    Fixture {
        repos,
        hotel,
        room_type,
        room_101,
        room_102,
        customer,
        staff,
    }
}
