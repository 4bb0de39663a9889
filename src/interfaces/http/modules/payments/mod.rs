//! Payments against a booking and its balance

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
