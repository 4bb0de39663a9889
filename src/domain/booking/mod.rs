//! Booking aggregate
//!
//! A booking reserves one room for one customer over a half-open date range
//! and moves through `booked → checked_in → checked_out`, with `cancelled`
//! reachable from the first two states.

pub mod model;
pub mod repository;
pub mod stay;

pub use model::{
    Booking, BookingFilter, BookingStatus, BookingTransition, CheckIn, CheckOut, NewBooking,
};
pub use repository::BookingRepository;
pub use stay::StayDates;
