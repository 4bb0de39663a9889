//! # Hotel Service
//!
//! Back-office backend for a hotel: rooms and room types, customers,
//! bookings with check-in/check-out, payments, staff accounts and reports.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, repository traits and invariants
//! - **application**: Use cases orchestrating repositories
//! - **infrastructure**: SeaORM persistence, crypto and notification adapters
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Runtime bootstrap shared by the binaries

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiSettings, AppState};
