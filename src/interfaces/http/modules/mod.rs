pub mod auth;
pub mod bookings;
pub mod customers;
pub mod health;
pub mod hotels;
pub mod metrics;
pub mod payments;
pub mod reports;
pub mod request_id;
pub mod rooms;
pub mod staff;
