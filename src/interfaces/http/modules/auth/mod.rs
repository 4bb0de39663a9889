//! Authentication: login, current user, password change and OTP reset

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
