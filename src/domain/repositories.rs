//! Repository access for the domain layer
//!
//! `RepositoryProvider` gives unified access to all per-aggregate
//! repositories.

use super::booking::BookingRepository;
use super::customer::CustomerRepository;
use super::hotel::HotelRepository;
use super::payment::PaymentRepository;
use super::room::RoomRepository;
use super::user::{PasswordResetRepository, UserRepositoryInterface};

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let room = repos.rooms().find_by_id(101).await?;
///     let clash = repos.bookings().find_overlapping(101, stay).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn hotels(&self) -> &dyn HotelRepository;
    fn rooms(&self) -> &dyn RoomRepository;
    fn customers(&self) -> &dyn CustomerRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn payments(&self) -> &dyn PaymentRepository;
    fn users(&self) -> &dyn UserRepositoryInterface;
    fn password_resets(&self) -> &dyn PasswordResetRepository;
}
