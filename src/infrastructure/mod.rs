//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod notifications;

pub use database::repositories::SeaOrmRepositoryProvider;
pub use database::{init_database, DatabaseConfig};
pub use notifications::LogNotificationSender;
