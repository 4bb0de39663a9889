//! Booking lifecycle endpoints: reserve, quote, check in, check out, cancel

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
