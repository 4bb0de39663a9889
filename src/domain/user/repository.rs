use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{CreateUserDto, GetUserDto, PasswordReset, UpdateUserDto, User};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn list_users(&self, dto: GetUserDto) -> DomainResult<PaginatedResult<User>>;
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn count_users(&self) -> DomainResult<u64>;

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>>;
    async fn update_user_password(&self, id: &str, new_password_hash: &str) -> DomainResult<()>;
    async fn touch_last_login(&self, id: &str) -> DomainResult<()>;
}

#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    async fn create(
        &self,
        user_id: &str,
        otp_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<PasswordReset>;

    /// Unconsumed, unexpired codes of a user still under the attempt cap, newest first
    async fn find_usable(&self, user_id: &str, now: DateTime<Utc>) -> DomainResult<Vec<PasswordReset>>;

    /// Mark a code consumed. Returns false if it was already consumed.
    async fn consume(&self, id: i32, now: DateTime<Utc>) -> DomainResult<bool>;

    /// Count a wrong guess against every usable code of a user.
    async fn record_failed_attempt(&self, user_id: &str, now: DateTime<Utc>) -> DomainResult<()>;
}
