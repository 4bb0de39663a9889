//! User aggregate
//!
//! Staff accounts, their roles, DTOs, password reset codes and repository
//! interfaces.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_get;
mod dto_update;

// Re-export model types
pub use model::{PasswordReset, User, UserRole, MAX_OTP_ATTEMPTS};

// Re-export DTOs
pub use dto_create::CreateUserDto;
pub use dto_get::GetUserDto;
pub use dto_update::UpdateUserDto;

// Re-export repository traits
pub use repository::{PasswordResetRepository, UserRepositoryInterface};
