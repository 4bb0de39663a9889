//! Rooms and manual status changes

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
