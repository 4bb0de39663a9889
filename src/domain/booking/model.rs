//! Booking domain entity and lifecycle state machine

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use super::stay::StayDates;
use crate::domain::room::RoomStatusChange;
use crate::domain::{DomainError, DomainResult};
use crate::shared::PageRequest;

/// Booking lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BookingStatus {
    #[default]
    Booked,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        Self::Booked,
        Self::CheckedIn,
        Self::CheckedOut,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
            Self::Cancelled => "cancelled",
        }
    }

    /// Statuses that hold the room for their date range
    pub fn blocks_room(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }

    pub fn blocking() -> [BookingStatus; 3] {
        [Self::Booked, Self::CheckedIn, Self::CheckedOut]
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "booked" => Ok(Self::Booked),
            "checked_in" => Ok(Self::CheckedIn),
            "checked_out" => Ok(Self::CheckedOut),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::Validation(format!(
                "Unknown booking status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i32,
    pub customer_id: i32,
    pub room_id: i32,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests: i32,
    pub status: BookingStatus,
    /// Minor currency units
    pub total_amount: i64,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Check-in event, one per booking
#[derive(Debug, Clone)]
pub struct CheckIn {
    pub booking_id: i32,
    pub checked_in_at: DateTime<Utc>,
    /// User id of the staff member
    pub checked_in_by: String,
    pub notes: Option<String>,
}

/// Check-out event, one per booking
#[derive(Debug, Clone)]
pub struct CheckOut {
    pub booking_id: i32,
    pub checked_out_at: DateTime<Utc>,
    pub checked_out_by: String,
    pub additional_charges: i64,
    pub notes: Option<String>,
}

/// A lifecycle step together with the record it produces.
#[derive(Debug, Clone)]
pub enum BookingTransition {
    CheckedIn(CheckIn),
    CheckedOut(CheckOut),
    Cancelled,
}

impl BookingTransition {
    /// Room update that must be persisted together with the booking.
    pub fn room_change(&self, from: BookingStatus) -> Option<RoomStatusChange> {
        match (self, from) {
            (Self::CheckedIn(_), _) => Some(RoomStatusChange::occupy()),
            (Self::CheckedOut(_), _) => Some(RoomStatusChange::release()),
            (Self::Cancelled, BookingStatus::CheckedIn) => Some(RoomStatusChange::release()),
            (Self::Cancelled, _) => None,
        }
    }
}

impl Booking {
    pub fn stay(&self) -> DomainResult<StayDates> {
        StayDates::new(self.check_in_date, self.check_out_date)
    }

    fn ensure(&self, action: &'static str, allowed: &[BookingStatus]) -> DomainResult<()> {
        if allowed.contains(&self.status) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                action,
                status: self.status.to_string(),
            })
        }
    }

    /// `booked → checked_in`
    pub fn check_in(&mut self, actor: &str, notes: Option<String>) -> DomainResult<BookingTransition> {
        self.ensure("check in", &[BookingStatus::Booked])?;
        let now = Utc::now();
        self.status = BookingStatus::CheckedIn;
        self.updated_at = now;
        Ok(BookingTransition::CheckedIn(CheckIn {
            booking_id: self.id,
            checked_in_at: now,
            checked_in_by: actor.to_string(),
            notes,
        }))
    }

    /// `checked_in → checked_out`, adding extra charges to the total
    pub fn check_out(
        &mut self,
        actor: &str,
        additional_charges: i64,
        notes: Option<String>,
    ) -> DomainResult<BookingTransition> {
        self.ensure("check out", &[BookingStatus::CheckedIn])?;
        if additional_charges < 0 {
            return Err(DomainError::Validation(
                "Additional charges must not be negative".into(),
            ));
        }
        let total = self
            .total_amount
            .checked_add(additional_charges)
            .ok_or_else(|| DomainError::Validation("Booking total is out of range".into()))?;

        let now = Utc::now();
        self.status = BookingStatus::CheckedOut;
        self.total_amount = total;
        self.updated_at = now;
        Ok(BookingTransition::CheckedOut(CheckOut {
            booking_id: self.id,
            checked_out_at: now,
            checked_out_by: actor.to_string(),
            additional_charges,
            notes,
        }))
    }

    /// `booked | checked_in → cancelled`
    pub fn cancel(&mut self) -> DomainResult<BookingTransition> {
        self.ensure("cancel", &[BookingStatus::Booked, BookingStatus::CheckedIn])?;
        self.status = BookingStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(BookingTransition::Cancelled)
    }
}

/// Booking to insert; total is computed by the caller
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: i32,
    pub room_id: i32,
    pub stay: StayDates,
    pub guests: i32,
    pub total_amount: i64,
    pub notes: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub customer_id: Option<i32>,
    pub room_id: Option<i32>,
    /// Only bookings whose stay overlaps this range
    pub stay: Option<StayDates>,
    pub page: PageRequest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::room::RoomStatus;

    fn booking(status: BookingStatus) -> Booking {
        let now = Utc::now();
        Booking {
            id: 1,
            customer_id: 1,
            room_id: 101,
            check_in_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            guests: 2,
            status,
            total_amount: 20_000,
            notes: None,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn full_lifecycle() {
        let mut b = booking(BookingStatus::Booked);
        b.check_in("staff-1", None).unwrap();
        assert_eq!(b.status, BookingStatus::CheckedIn);

        let t = b.check_out("staff-1", 1_500, Some("minibar".into())).unwrap();
        assert_eq!(b.status, BookingStatus::CheckedOut);
        assert_eq!(b.total_amount, 21_500);
        match t {
            BookingTransition::CheckedOut(co) => assert_eq!(co.additional_charges, 1_500),
            other => panic!("unexpected transition {:?}", other),
        }
    }

    #[test]
    fn check_in_requires_booked() {
        for status in [
            BookingStatus::CheckedIn,
            BookingStatus::CheckedOut,
            BookingStatus::Cancelled,
        ] {
            let mut b = booking(status);
            let err = b.check_in("staff-1", None).unwrap_err();
            assert!(matches!(err, DomainError::InvalidTransition { action: "check in", .. }));
            assert_eq!(b.status, status);
        }
    }

    #[test]
    fn check_out_without_check_in_fails() {
        let mut b = booking(BookingStatus::Booked);
        let err = b.check_out("staff-1", 0, None).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { action: "check out", .. }));
        assert_eq!(b.total_amount, 20_000);
    }

    #[test]
    fn negative_charges_rejected() {
        let mut b = booking(BookingStatus::CheckedIn);
        assert!(matches!(
            b.check_out("staff-1", -1, None),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(b.status, BookingStatus::CheckedIn);
    }

    #[test]
    fn cancel_after_check_out_fails() {
        let mut b = booking(BookingStatus::CheckedOut);
        assert!(b.cancel().is_err());
        let mut b = booking(BookingStatus::Cancelled);
        assert!(b.cancel().is_err());
        let mut b = booking(BookingStatus::CheckedIn);
        assert!(b.cancel().is_ok());
    }

    #[test]
    fn room_changes_follow_transition() {
        let mut b = booking(BookingStatus::Booked);
        let t = b.check_in("staff-1", None).unwrap();
        assert_eq!(t.room_change(BookingStatus::Booked).unwrap().to, RoomStatus::Occupied);

        assert!(BookingTransition::Cancelled
            .room_change(BookingStatus::Booked)
            .is_none());
        let release = BookingTransition::Cancelled
            .room_change(BookingStatus::CheckedIn)
            .unwrap();
        assert_eq!(release.from, RoomStatus::Occupied);
        assert_eq!(release.to, RoomStatus::Available);
    }

    #[test]
    fn status_strings() {
        assert_eq!("checked-in".parse::<BookingStatus>().unwrap(), BookingStatus::CheckedIn);
        for s in BookingStatus::ALL {
            assert_eq!(s.to_string().parse::<BookingStatus>().unwrap(), s);
        }
        assert!(!BookingStatus::Cancelled.blocks_room());
        assert!(BookingStatus::CheckedOut.blocks_room());
    }
}
