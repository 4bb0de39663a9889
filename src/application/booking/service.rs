//! Booking service: reservation and stay lifecycle orchestration
//!
//! Validates requests against inventory and customers, prices stays and
//! drives the booking state machine. Every transition is handed to the
//! repository as one atomic unit together with its room status change.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::booking::{
    Booking, BookingFilter, BookingStatus, CheckIn, CheckOut, NewBooking, StayDates,
};
use crate::domain::customer::Customer;
use crate::domain::hotel::RoomType;
use crate::domain::room::{Room, RoomStatus};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::PaginatedResult;

/// Reservation request
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub customer_id: i32,
    pub room_id: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub notes: Option<String>,
    /// User id of the staff member taking the reservation
    pub created_by: Option<String>,
}

/// Price preview for a room and date range
#[derive(Debug, Clone)]
pub struct Quote {
    pub room_id: i32,
    pub room_type_id: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub nightly_rate: i64,
    pub total: i64,
    /// False when an overlapping booking exists or the room is under maintenance
    pub available: bool,
}

/// Booking with everything a front desk screen shows
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub booking: Booking,
    pub customer: Customer,
    pub room: Room,
    pub check_in: Option<CheckIn>,
    pub check_out: Option<CheckOut>,
    pub paid: i64,
}

fn record_event(event: &'static str) {
    metrics::counter!("hotel_booking_events_total", "event" => event).increment(1);
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn room_with_type(&self, room_id: i32) -> DomainResult<(Room, RoomType)> {
        let room = self
            .repos
            .rooms()
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", "id", room_id))?;
        let room_type = self
            .repos
            .hotels()
            .find_room_type(room.room_type_id)
            .await?
            .ok_or_else(|| DomainError::not_found("RoomType", "id", room.room_type_id))?;
        Ok((room, room_type))
    }

    // ── Reservation ─────────────────────────────────────────────

    /// Reserve a room. Rejects overlapping stays with `Conflict`.
    pub async fn create(&self, cmd: CreateBooking) -> DomainResult<Booking> {
        let stay = StayDates::new(cmd.check_in, cmd.check_out)?;
        if cmd.guests < 1 {
            return Err(DomainError::Validation(
                "A booking needs at least one guest".into(),
            ));
        }

        if self.repos.customers().find_by_id(cmd.customer_id).await?.is_none() {
            return Err(DomainError::not_found("Customer", "id", cmd.customer_id));
        }

        let (room, room_type) = self.room_with_type(cmd.room_id).await?;
        if room.status == RoomStatus::Maintenance {
            return Err(DomainError::Conflict(format!(
                "Room {} is under maintenance",
                room.number
            )));
        }
        if !room_type.fits(cmd.guests) {
            return Err(DomainError::Validation(format!(
                "Room {} holds at most {} guests",
                room.number, room_type.capacity
            )));
        }

        let total_amount = room_type.price_for(stay.nights())?;

        let result = self
            .repos
            .bookings()
            .create_if_available(NewBooking {
                customer_id: cmd.customer_id,
                room_id: room.id,
                stay,
                guests: cmd.guests,
                total_amount,
                notes: cmd.notes,
                created_by: cmd.created_by,
            })
            .await;

        match &result {
            Ok(b) => {
                record_event("created");
                info!(
                    booking_id = b.id,
                    room = %room.number,
                    nights = stay.nights(),
                    total = b.total_amount,
                    "Booking created"
                );
            }
            Err(DomainError::Conflict(msg)) => {
                record_event("rejected_overlap");
                warn!(room = %room.number, "Booking rejected: {}", msg);
            }
            Err(_) => {}
        }
        result
    }

    /// Price a stay without reserving anything
    pub async fn quote(
        &self,
        room_id: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Quote> {
        let stay = StayDates::new(check_in, check_out)?;
        let (room, room_type) = self.room_with_type(room_id).await?;
        let clashes = self.repos.bookings().find_overlapping(room.id, stay).await?;

        Ok(Quote {
            room_id: room.id,
            room_type_id: room_type.id,
            check_in,
            check_out,
            nights: stay.nights(),
            nightly_rate: room_type.base_price,
            total: room_type.price_for(stay.nights())?,
            available: clashes.is_empty() && room.status != RoomStatus::Maintenance,
        })
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get(&self, id: i32) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", id))
    }

    pub async fn details(&self, id: i32) -> DomainResult<BookingDetails> {
        let booking = self.get(id).await?;
        let customer = self
            .repos
            .customers()
            .find_by_id(booking.customer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", "id", booking.customer_id))?;
        let room = self
            .repos
            .rooms()
            .find_by_id(booking.room_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", "id", booking.room_id))?;
        let check_in = self.repos.bookings().find_check_in(id).await?;
        let check_out = self.repos.bookings().find_check_out(id).await?;
        let paid = self.repos.payments().total_for_booking(id).await?;

        Ok(BookingDetails {
            booking,
            customer,
            room,
            check_in,
            check_out,
            paid,
        })
    }

    pub async fn list(&self, filter: BookingFilter) -> DomainResult<PaginatedResult<Booking>> {
        self.repos.bookings().find_all(filter).await
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// `booked → checked_in`; marks the room occupied
    pub async fn check_in(
        &self,
        id: i32,
        actor_id: &str,
        notes: Option<String>,
    ) -> DomainResult<Booking> {
        let mut booking = self.get(id).await?;
        let from = booking.status;
        let transition = booking.check_in(actor_id, notes)?;

        let room = self
            .repos
            .rooms()
            .find_by_id(booking.room_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", "id", booking.room_id))?;
        match room.status {
            RoomStatus::Available => {}
            RoomStatus::Occupied => {
                return Err(DomainError::Conflict(format!(
                    "Room {} is occupied by another stay",
                    room.number
                )))
            }
            RoomStatus::Maintenance => {
                return Err(DomainError::Conflict(format!(
                    "Room {} is under maintenance",
                    room.number
                )))
            }
        }

        self.repos
            .bookings()
            .apply_transition(&booking, from, transition)
            .await?;
        record_event("checked_in");
        info!(booking_id = id, room = %room.number, actor = actor_id, "Guest checked in");
        Ok(booking)
    }

    /// `checked_in → checked_out`; frees the room and finalizes the total
    pub async fn check_out(
        &self,
        id: i32,
        actor_id: &str,
        additional_charges: i64,
        notes: Option<String>,
    ) -> DomainResult<Booking> {
        let mut booking = self.get(id).await?;
        let from = booking.status;
        let transition = booking.check_out(actor_id, additional_charges, notes)?;

        self.repos
            .bookings()
            .apply_transition(&booking, from, transition)
            .await?;
        record_event("checked_out");
        info!(
            booking_id = id,
            additional_charges,
            total = booking.total_amount,
            actor = actor_id,
            "Guest checked out"
        );
        Ok(booking)
    }

    /// `booked | checked_in → cancelled`; a checked-in stay frees its room
    pub async fn cancel(&self, id: i32) -> DomainResult<Booking> {
        let mut booking = self.get(id).await?;
        let from = booking.status;
        let transition = booking.cancel()?;

        self.repos
            .bookings()
            .apply_transition(&booking, from, transition)
            .await?;
        record_event("cancelled");
        info!(booking_id = id, previous = %from, "Booking cancelled");
        Ok(booking)
    }
}

/// Status filter helper for list endpoints
pub fn parse_status(s: Option<&str>) -> DomainResult<Option<BookingStatus>> {
    s.map(str::parse).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::{date, fixture, Fixture};

    fn service(f: &Fixture) -> BookingService {
        BookingService::new(f.repos.clone())
    }

    fn request(f: &Fixture, room_id: i32, from: NaiveDate, to: NaiveDate) -> CreateBooking {
        CreateBooking {
            customer_id: f.customer.id,
            room_id,
            check_in: from,
            check_out: to,
            guests: 2,
            notes: None,
            created_by: Some(f.staff.id.clone()),
        }
    }

    async fn room_status(f: &Fixture, room_id: i32) -> RoomStatus {
        f.repos.rooms().find_by_id(room_id).await.unwrap().unwrap().status
    }

    #[tokio::test]
    async fn overlapping_booking_is_rejected() {
        let f = fixture().await;
        let svc = service(&f);

        let first = svc
            .create(request(&f, f.room_101.id, date(2024, 1, 1), date(2024, 1, 3)))
            .await
            .unwrap();
        assert_eq!(first.status, BookingStatus::Booked);
        assert_eq!(first.total_amount, 20_000);

        let err = svc
            .create(request(&f, f.room_101.id, date(2024, 1, 2), date(2024, 1, 4)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);

        // Same dates on another room are fine
        svc.create(request(&f, f.room_102.id, date(2024, 1, 2), date(2024, 1, 4)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn back_to_back_and_cancelled_dates_are_free() {
        let f = fixture().await;
        let svc = service(&f);

        let first = svc
            .create(request(&f, f.room_101.id, date(2024, 1, 1), date(2024, 1, 3)))
            .await
            .unwrap();
        svc.create(request(&f, f.room_101.id, date(2024, 1, 3), date(2024, 1, 5)))
            .await
            .unwrap();

        svc.cancel(first.id).await.unwrap();
        svc.create(request(&f, f.room_101.id, date(2024, 1, 1), date(2024, 1, 3)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_validates_request() {
        let f = fixture().await;
        let svc = service(&f);

        let mut bad_dates = request(&f, f.room_101.id, date(2024, 1, 3), date(2024, 1, 3));
        assert!(matches!(
            svc.create(bad_dates.clone()).await,
            Err(DomainError::Validation(_))
        ));

        bad_dates.check_out = date(2024, 1, 4);
        bad_dates.guests = 3;
        assert!(matches!(
            svc.create(bad_dates.clone()).await,
            Err(DomainError::Validation(_))
        ));

        let mut unknown = request(&f, 9_999, date(2024, 1, 1), date(2024, 1, 2));
        assert!(matches!(
            svc.create(unknown.clone()).await,
            Err(DomainError::NotFound { entity: "Room", .. })
        ));
        unknown.room_id = f.room_101.id;
        unknown.customer_id = 9_999;
        assert!(matches!(
            svc.create(unknown).await,
            Err(DomainError::NotFound { entity: "Customer", .. })
        ));
    }

    #[tokio::test]
    async fn maintenance_room_cannot_be_booked() {
        let f = fixture().await;
        f.repos
            .rooms()
            .update_status(f.room_101.id, RoomStatus::Available, RoomStatus::Maintenance)
            .await
            .unwrap();

        let err = service(&f)
            .create(request(&f, f.room_101.id, date(2024, 1, 1), date(2024, 1, 2)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn full_stay_updates_room_and_total() {
        let f = fixture().await;
        let svc = service(&f);
        let b = svc
            .create(request(&f, f.room_101.id, date(2024, 1, 1), date(2024, 1, 3)))
            .await
            .unwrap();

        let b = svc.check_in(b.id, &f.staff.id, Some("late arrival".into())).await.unwrap();
        assert_eq!(b.status, BookingStatus::CheckedIn);
        assert_eq!(room_status(&f, f.room_101.id).await, RoomStatus::Occupied);

        let b = svc.check_out(b.id, &f.staff.id, 2_500, None).await.unwrap();
        assert_eq!(b.status, BookingStatus::CheckedOut);
        assert_eq!(b.total_amount, 22_500);
        assert_eq!(room_status(&f, f.room_101.id).await, RoomStatus::Available);

        let details = svc.details(b.id).await.unwrap();
        assert_eq!(details.booking.total_amount, 22_500);
        assert_eq!(
            details.check_in.unwrap().notes.as_deref(),
            Some("late arrival")
        );
        assert_eq!(details.check_out.unwrap().additional_charges, 2_500);
        assert_eq!(details.customer.id, f.customer.id);
    }

    #[tokio::test]
    async fn check_out_without_check_in_fails() {
        let f = fixture().await;
        let svc = service(&f);
        let b = svc
            .create(request(&f, f.room_101.id, date(2024, 1, 1), date(2024, 1, 3)))
            .await
            .unwrap();

        let err = svc.check_out(b.id, &f.staff.id, 0, None).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(svc.get(b.id).await.unwrap().status, BookingStatus::Booked);
    }

    #[tokio::test]
    async fn cancel_after_check_out_fails() {
        let f = fixture().await;
        let svc = service(&f);
        let b = svc
            .create(request(&f, f.room_101.id, date(2024, 1, 1), date(2024, 1, 3)))
            .await
            .unwrap();
        svc.check_in(b.id, &f.staff.id, None).await.unwrap();
        svc.check_out(b.id, &f.staff.id, 0, None).await.unwrap();

        let err = svc.cancel(b.id).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { action: "cancel", .. }));
        assert!(svc.check_in(b.id, &f.staff.id, None).await.is_err());
    }

    #[tokio::test]
    async fn cancelling_checked_in_stay_frees_room() {
        let f = fixture().await;
        let svc = service(&f);
        let b = svc
            .create(request(&f, f.room_101.id, date(2024, 1, 1), date(2024, 1, 3)))
            .await
            .unwrap();
        svc.check_in(b.id, &f.staff.id, None).await.unwrap();

        let b = svc.cancel(b.id).await.unwrap();
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert_eq!(room_status(&f, f.room_101.id).await, RoomStatus::Available);
    }

    #[tokio::test]
    async fn check_in_blocked_while_room_occupied() {
        let f = fixture().await;
        let svc = service(&f);
        let current = svc
            .create(request(&f, f.room_101.id, date(2024, 1, 1), date(2024, 1, 3)))
            .await
            .unwrap();
        let next = svc
            .create(request(&f, f.room_101.id, date(2024, 1, 3), date(2024, 1, 4)))
            .await
            .unwrap();
        svc.check_in(current.id, &f.staff.id, None).await.unwrap();

        let err = svc.check_in(next.id, &f.staff.id, None).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(svc.get(next.id).await.unwrap().status, BookingStatus::Booked);
    }

    #[tokio::test]
    async fn quote_reports_price_and_availability() {
        let f = fixture().await;
        let svc = service(&f);
        let q = svc
            .quote(f.room_101.id, date(2024, 2, 1), date(2024, 2, 4))
            .await
            .unwrap();
        assert_eq!(q.nights, 3);
        assert_eq!(q.total, 30_000);
        assert!(q.available);

        svc.create(request(&f, f.room_101.id, date(2024, 2, 2), date(2024, 2, 3)))
            .await
            .unwrap();
        let q = svc
            .quote(f.room_101.id, date(2024, 2, 1), date(2024, 2, 4))
            .await
            .unwrap();
        assert!(!q.available);
    }

    #[test]
    fn status_filter_parsing() {
        assert_eq!(parse_status(None).unwrap(), None);
        assert_eq!(
            parse_status(Some("checked_in")).unwrap(),
            Some(BookingStatus::CheckedIn)
        );
        assert!(parse_status(Some("gone")).is_err());
    }
}
