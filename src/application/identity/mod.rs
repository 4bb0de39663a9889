//! Identity module: staff accounts and authentication
//!
//! `UserService` covers login, the current user, password changes,
//! staff management and OTP-based password reset.

pub mod service;

pub use service::{AuthResult, CreateStaff, UserService};
