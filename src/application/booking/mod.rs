//! Booking lifecycle use-cases

pub mod service;

pub use service::{BookingDetails, BookingService, CreateBooking, Quote};
