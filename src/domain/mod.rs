//! Domain layer
//!
//! Aggregates, value objects and repository interfaces. No I/O lives here.

pub mod booking;
pub mod customer;
pub mod hotel;
pub mod payment;
pub mod repositories;
pub mod room;
pub mod user;

pub use booking::{Booking, BookingStatus, StayDates};
pub use customer::Customer;
pub use hotel::{Hotel, RoomType};
pub use payment::{Payment, PaymentMethod};
pub use repositories::RepositoryProvider;
pub use room::{Room, RoomStatus};
pub use user::{
    CreateUserDto, GetUserDto, PasswordReset, UpdateUserDto, User, UserRepositoryInterface,
    UserRole,
};

pub use crate::shared::errors::{DomainError, DomainResult};
