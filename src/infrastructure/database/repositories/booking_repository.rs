//! SeaORM implementation of BookingRepository
//!
//! New bookings are checked for overlap and inserted inside one transaction,
//! serialized by an in-process write lock. Lifecycle transitions use a
//! status-conditional UPDATE so that two concurrent transitions of the same
//! booking cannot both succeed.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tokio::sync::Mutex;

use super::db_err;
use super::room_repository::status_to_entity as room_status_to_entity;
use crate::domain::booking::{
    Booking, BookingFilter, BookingRepository, BookingStatus, BookingTransition, CheckIn, CheckOut,
    NewBooking, StayDates,
};
use crate::domain::room::RoomStatusChange;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, check_in, check_out, room};
use crate::shared::PaginatedResult;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
    write_lock: Mutex<()>,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            write_lock: Mutex::new(()),
        }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_entity(s: BookingStatus) -> booking::BookingStatus {
    match s {
        BookingStatus::Booked => booking::BookingStatus::Booked,
        BookingStatus::CheckedIn => booking::BookingStatus::CheckedIn,
        BookingStatus::CheckedOut => booking::BookingStatus::CheckedOut,
        BookingStatus::Cancelled => booking::BookingStatus::Cancelled,
    }
}

fn status_to_domain(s: booking::BookingStatus) -> BookingStatus {
    match s {
        booking::BookingStatus::Booked => BookingStatus::Booked,
        booking::BookingStatus::CheckedIn => BookingStatus::CheckedIn,
        booking::BookingStatus::CheckedOut => BookingStatus::CheckedOut,
        booking::BookingStatus::Cancelled => BookingStatus::Cancelled,
    }
}

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        customer_id: m.customer_id,
        room_id: m.room_id,
        check_in_date: m.check_in_date,
        check_out_date: m.check_out_date,
        guests: m.guests,
        status: status_to_domain(m.status),
        total_amount: m.total_amount,
        notes: m.notes,
        created_by: m.created_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn check_in_to_domain(m: check_in::Model) -> CheckIn {
    CheckIn {
        booking_id: m.booking_id,
        checked_in_at: m.checked_in_at,
        checked_in_by: m.checked_in_by,
        notes: m.notes,
    }
}

fn check_out_to_domain(m: check_out::Model) -> CheckOut {
    CheckOut {
        booking_id: m.booking_id,
        checked_out_at: m.checked_out_at,
        checked_out_by: m.checked_out_by,
        additional_charges: m.additional_charges,
        notes: m.notes,
    }
}

/// Non-cancelled bookings of `room_id` overlapping `stay`
fn overlapping(room_id: i32, stay: StayDates) -> sea_orm::Select<booking::Entity> {
    booking::Entity::find()
        .filter(booking::Column::RoomId.eq(room_id))
        .filter(booking::Column::Status.ne(booking::BookingStatus::Cancelled))
        .filter(booking::Column::CheckInDate.lt(stay.check_out()))
        .filter(booking::Column::CheckOutDate.gt(stay.check_in()))
}

async fn apply_room_change(
    txn: &DatabaseTransaction,
    room_id: i32,
    change: RoomStatusChange,
) -> DomainResult<()> {
    let result = room::Entity::update_many()
        .col_expr(room::Column::Status, Expr::value(room_status_to_entity(change.to)))
        .col_expr(room::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(room::Column::Id.eq(room_id))
        .filter(room::Column::Status.eq(room_status_to_entity(change.from)))
        .exec(txn)
        .await
        .map_err(db_err)?;

    if result.rows_affected == 0 {
        if change.required {
            return Err(DomainError::Conflict(format!(
                "Room {} is not {}",
                room_id, change.from
            )));
        }
        warn!(
            "Room {} was not {} while setting it {}; left unchanged",
            room_id, change.from, change.to
        );
    }
    Ok(())
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create_if_available(&self, b: NewBooking) -> DomainResult<Booking> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await.map_err(db_err)?;

        if let Some(clash) = overlapping(b.room_id, b.stay)
            .one(&txn)
            .await
            .map_err(db_err)?
        {
            debug!(
                "Room {} already booked {}..{} by booking {}",
                b.room_id, clash.check_in_date, clash.check_out_date, clash.id
            );
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::Conflict(format!(
                "Room {} is already booked between {} and {}",
                b.room_id, clash.check_in_date, clash.check_out_date
            )));
        }

        let now = Utc::now();
        let model = booking::ActiveModel {
            id: NotSet,
            customer_id: Set(b.customer_id),
            room_id: Set(b.room_id),
            check_in_date: Set(b.stay.check_in()),
            check_out_date: Set(b.stay.check_out()),
            guests: Set(b.guests),
            status: Set(booking::BookingStatus::Booked),
            total_amount: Set(b.total_amount),
            notes: Set(b.notes),
            created_by: Set(b.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let inserted = model.insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        info!(
            "Booking {} created for room {} ({} → {})",
            inserted.id, inserted.room_id, inserted.check_in_date, inserted.check_out_date
        );
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self, filter: BookingFilter) -> DomainResult<PaginatedResult<Booking>> {
        let mut query = booking::Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(booking::Column::Status.eq(status_to_entity(status)));
        }
        if let Some(customer_id) = filter.customer_id {
            query = query.filter(booking::Column::CustomerId.eq(customer_id));
        }
        if let Some(room_id) = filter.room_id {
            query = query.filter(booking::Column::RoomId.eq(room_id));
        }
        if let Some(stay) = filter.stay {
            query = query
                .filter(booking::Column::CheckInDate.lt(stay.check_out()))
                .filter(booking::Column::CheckOutDate.gt(stay.check_in()));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .order_by_desc(booking::Column::CheckInDate)
            .order_by_desc(booking::Column::Id)
            .offset(filter.page.offset())
            .limit(filter.page.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(
            items,
            total,
            filter.page.page,
            filter.page.page_size,
        ))
    }

    async fn find_overlapping(&self, room_id: i32, stay: StayDates) -> DomainResult<Vec<Booking>> {
        let models = overlapping(room_id, stay)
            .order_by_asc(booking::Column::CheckInDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn apply_transition(
        &self,
        b: &Booking,
        from: BookingStatus,
        transition: BookingTransition,
    ) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let result = booking::Entity::update_many()
            .col_expr(booking::Column::Status, Expr::value(status_to_entity(b.status)))
            .col_expr(booking::Column::TotalAmount, Expr::value(b.total_amount))
            .col_expr(booking::Column::UpdatedAt, Expr::value(b.updated_at))
            .filter(booking::Column::Id.eq(b.id))
            .filter(booking::Column::Status.eq(status_to_entity(from)))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::Conflict(format!(
                "Booking {} is no longer {}; it was modified concurrently",
                b.id, from
            )));
        }

        if let Some(change) = transition.room_change(from) {
            if let Err(e) = apply_room_change(&txn, b.room_id, change).await {
                txn.rollback().await.map_err(db_err)?;
                return Err(e);
            }
        }

        match transition {
            BookingTransition::CheckedIn(ci) => {
                check_in::ActiveModel {
                    id: NotSet,
                    booking_id: Set(ci.booking_id),
                    checked_in_at: Set(ci.checked_in_at),
                    checked_in_by: Set(ci.checked_in_by),
                    notes: Set(ci.notes),
                }
                .insert(&txn)
                .await
                .map_err(db_err)?;
            }
            BookingTransition::CheckedOut(co) => {
                check_out::ActiveModel {
                    id: NotSet,
                    booking_id: Set(co.booking_id),
                    checked_out_at: Set(co.checked_out_at),
                    checked_out_by: Set(co.checked_out_by),
                    additional_charges: Set(co.additional_charges),
                    notes: Set(co.notes),
                }
                .insert(&txn)
                .await
                .map_err(db_err)?;
            }
            BookingTransition::Cancelled => {}
        }

        txn.commit().await.map_err(db_err)?;
        info!("Booking {} {} → {}", b.id, from, b.status);
        Ok(())
    }

    async fn find_check_in(&self, booking_id: i32) -> DomainResult<Option<CheckIn>> {
        let model = check_in::Entity::find()
            .filter(check_in::Column::BookingId.eq(booking_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(check_in_to_domain))
    }

    async fn find_check_out(&self, booking_id: i32) -> DomainResult<Option<CheckOut>> {
        let model = check_out::Entity::find()
            .filter(check_out::Column::BookingId.eq(booking_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(check_out_to_domain))
    }

    async fn count_by_status(&self) -> DomainResult<Vec<(BookingStatus, u64)>> {
        let mut counts = Vec::with_capacity(BookingStatus::ALL.len());
        for status in BookingStatus::ALL {
            let n = booking::Entity::find()
                .filter(booking::Column::Status.eq(status_to_entity(status)))
                .count(&self.db)
                .await
                .map_err(db_err)?;
            counts.push((status, n));
        }
        Ok(counts)
    }

    async fn find_arrivals(&self, date: NaiveDate) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Status.eq(booking::BookingStatus::Booked))
            .filter(booking::Column::CheckInDate.eq(date))
            .order_by_asc(booking::Column::RoomId)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_departures(&self, date: NaiveDate) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Status.eq(booking::BookingStatus::CheckedIn))
            .filter(booking::Column::CheckOutDate.eq(date))
            .order_by_asc(booking::Column::RoomId)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::room::RoomStatus;
    use crate::domain::RepositoryProvider;
    use crate::infrastructure::database::test_support::{date, fixture, Fixture};

    fn new_booking(f: &Fixture, room_id: i32, from: NaiveDate, to: NaiveDate) -> NewBooking {
        NewBooking {
            customer_id: f.customer.id,
            room_id,
            stay: StayDates::new(from, to).unwrap(),
            guests: 1,
            total_amount: 10_000,
            notes: None,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn concurrent_overlapping_creates_admit_one() {
        let f = fixture().await;
        let repos = Arc::clone(&f.repos);

        let mut handles = Vec::new();
        for offset in 0..4 {
            let repos = Arc::clone(&repos);
            let b = new_booking(
                &f,
                f.room_101.id,
                date(2024, 3, 1 + offset),
                date(2024, 3, 6),
            );
            handles.push(tokio::spawn(async move {
                repos.bookings().create_if_available(b).await
            }));
        }

        let mut ok = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(DomainError::Conflict(_)) => {}
                Err(e) => panic!("unexpected error: {}", e),
            }
        }
        assert_eq!(ok, 1);
    }

    #[tokio::test]
    async fn stale_transition_is_a_conflict() {
        let f = fixture().await;
        let repo = f.repos.bookings();
        let booked = repo
            .create_if_available(new_booking(&f, f.room_101.id, date(2024, 3, 1), date(2024, 3, 2)))
            .await
            .unwrap();

        let mut first = booked.clone();
        let t = first.cancel().unwrap();
        repo.apply_transition(&first, BookingStatus::Booked, t)
            .await
            .unwrap();

        // A second writer still holding the `booked` snapshot loses
        let mut second = booked.clone();
        let t = second.check_in(&f.staff.id, None).unwrap();
        let err = repo
            .apply_transition(&second, BookingStatus::Booked, t)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let room = f.repos.rooms().find_by_id(f.room_101.id).await.unwrap().unwrap();
        assert_eq!(room.status, RoomStatus::Available);
        assert!(repo.find_check_in(booked.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn check_in_rolls_back_when_room_not_available() {
        let f = fixture().await;
        let repo = f.repos.bookings();
        let booked = repo
            .create_if_available(new_booking(&f, f.room_102.id, date(2024, 3, 1), date(2024, 3, 2)))
            .await
            .unwrap();
        f.repos
            .rooms()
            .update_status(f.room_102.id, RoomStatus::Available, RoomStatus::Maintenance)
            .await
            .unwrap();

        let mut b = booked.clone();
        let t = b.check_in(&f.staff.id, None).unwrap();
        let err = repo
            .apply_transition(&b, BookingStatus::Booked, t)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = repo.find_by_id(booked.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Booked);
    }
}
