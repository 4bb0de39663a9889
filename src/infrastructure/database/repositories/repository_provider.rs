//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::customer::CustomerRepository;
use crate::domain::hotel::HotelRepository;
use crate::domain::payment::PaymentRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::room::RoomRepository;
use crate::domain::user::{PasswordResetRepository, UserRepositoryInterface};

use super::booking_repository::SeaOrmBookingRepository;
use super::customer_repository::SeaOrmCustomerRepository;
use super::hotel_repository::SeaOrmHotelRepository;
use super::password_reset_repository::SeaOrmPasswordResetRepository;
use super::payment_repository::SeaOrmPaymentRepository;
use super::room_repository::SeaOrmRoomRepository;
use super::user_repository::UserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
/// Build it once per process: the booking and payment repositories carry the
/// write locks that serialize check-and-insert.
pub struct SeaOrmRepositoryProvider {
    hotels: SeaOrmHotelRepository,
    rooms: SeaOrmRoomRepository,
    customers: SeaOrmCustomerRepository,
    bookings: SeaOrmBookingRepository,
    payments: SeaOrmPaymentRepository,
    users: UserRepository,
    password_resets: SeaOrmPasswordResetRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            hotels: SeaOrmHotelRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone()),
            customers: SeaOrmCustomerRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            password_resets: SeaOrmPasswordResetRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn hotels(&self) -> &dyn HotelRepository {
        &self.hotels
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }

    fn users(&self) -> &dyn UserRepositoryInterface {
        &self.users
    }

    fn password_resets(&self) -> &dyn PasswordResetRepository {
        &self.password_resets
    }
}
