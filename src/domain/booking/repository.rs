//! Booking repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Booking, BookingFilter, BookingStatus, BookingTransition, CheckIn, CheckOut, NewBooking};
use super::stay::StayDates;
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a booking unless the room already has a non-cancelled booking
    /// overlapping the stay. Check and insert are atomic.
    ///
    /// Fails with `Conflict` on overlap.
    async fn create_if_available(&self, booking: NewBooking) -> DomainResult<Booking>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    async fn find_all(&self, filter: BookingFilter) -> DomainResult<PaginatedResult<Booking>>;

    /// Non-cancelled bookings of a room overlapping `stay`
    async fn find_overlapping(&self, room_id: i32, stay: StayDates) -> DomainResult<Vec<Booking>>;

    /// Persist a lifecycle transition of `booking` (already mutated in memory).
    ///
    /// Status and total are written only if the stored status is still
    /// `from`; the lifecycle record and room status change are written in the
    /// same transaction. Fails with `Conflict` if either guard does not hold.
    async fn apply_transition(
        &self,
        booking: &Booking,
        from: BookingStatus,
        transition: BookingTransition,
    ) -> DomainResult<()>;

    async fn find_check_in(&self, booking_id: i32) -> DomainResult<Option<CheckIn>>;

    async fn find_check_out(&self, booking_id: i32) -> DomainResult<Option<CheckOut>>;

    async fn count_by_status(&self) -> DomainResult<Vec<(BookingStatus, u64)>>;

    /// `booked` bookings starting on `date`
    async fn find_arrivals(&self, date: NaiveDate) -> DomainResult<Vec<Booking>>;

    /// `checked_in` bookings ending on `date`
    async fn find_departures(&self, date: NaiveDate) -> DomainResult<Vec<Booking>>;
}
