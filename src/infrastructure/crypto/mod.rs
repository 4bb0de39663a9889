//! Token, password and one-time code primitives

pub mod jwt;
pub mod otp;
pub mod password;
