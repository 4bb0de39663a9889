//! User management service, application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info, warn};

use crate::application::ports::{Notification, NotificationChannel, NotificationSender};
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, GetUserDto, RepositoryProvider, UpdateUserDto,
    User, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::otp::{generate_otp, hash_otp};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::PaginatedResult;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct CreateStaff {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub password: String,
}

fn check_password_length(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

fn hash(password: &str) -> DomainResult<String> {
    hash_password(password)
        .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))
}

/// An unreadable stored hash counts as a mismatch.
fn password_matches(user: &User, password: &str) -> bool {
    verify_password(password, &user.password_hash).unwrap_or_else(|e| {
        error!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
        false
    })
}

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    notifier: Arc<dyn NotificationSender>,
    jwt_config: JwtConfig,
    otp_ttl: Duration,
}

impl UserService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        notifier: Arc<dyn NotificationSender>,
        jwt_config: JwtConfig,
        otp_ttl_minutes: i64,
    ) -> Self {
        Self {
            repos,
            notifier,
            jwt_config,
            otp_ttl: Duration::minutes(otp_ttl_minutes),
        }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username or email and return a bearer token.
    pub async fn login(&self, username_or_email: &str, password: &str) -> DomainResult<AuthResult> {
        let users = self.repos.users();
        let user = match users.get_user_by_username(username_or_email).await? {
            Some(u) => Some(u),
            None => users.get_user_by_email(username_or_email).await?,
        };

        let Some(user) = user else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !password_matches(&user, password) {
            warn!(username = %user.username, "Failed login attempt");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }
        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let token = create_token(&user.id, &user.username, user.role.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;
        users.touch_last_login(&user.id).await?;

        info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expires_in_secs(),
            user,
        })
    }

    /// Current user; a deactivated account is treated as signed out.
    pub async fn me(&self, user_id: &str) -> DomainResult<User> {
        let user = self.get_staff(user_id).await?;
        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }
        Ok(user)
    }

    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        check_password_length(new_password)?;
        let user = self.get_staff(user_id).await?;

        if !password_matches(&user, current_password) {
            return Err(DomainError::Unauthorized("Invalid current password".into()));
        }

        self.repos
            .users()
            .update_user_password(user_id, &hash(new_password)?)
            .await?;
        info!(user_id, "Password changed");
        Ok(())
    }

    // ── Staff management ────────────────────────────────────────

    pub async fn create_staff(&self, cmd: CreateStaff) -> DomainResult<User> {
        let username = cmd.username.trim();
        if username.len() < 3 || username.len() > 50 {
            return Err(DomainError::Validation(
                "Username must be 3-50 characters".into(),
            ));
        }
        if !cmd.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        check_password_length(&cmd.password)?;

        let users = self.repos.users();
        if users.get_user_by_username(username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
        if users.get_user_by_email(&cmd.email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let user = users
            .create_user(CreateUserDto {
                username: username.to_string(),
                email: cmd.email.trim().to_string(),
                phone: cmd.phone,
                role: cmd.role,
                password_hash: hash(&cmd.password)?,
            })
            .await?;
        info!(user_id = %user.id, username = %user.username, role = %user.role, "Staff account created");
        Ok(user)
    }

    pub async fn list_staff(&self, query: GetUserDto) -> DomainResult<PaginatedResult<User>> {
        self.repos.users().list_users(query).await
    }

    pub async fn get_staff(&self, id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))
    }

    /// Admins may not lock themselves out by deactivating or demoting their
    /// own account.
    pub async fn update_staff(
        &self,
        actor_id: &str,
        id: &str,
        dto: UpdateUserDto,
    ) -> DomainResult<User> {
        if actor_id == id {
            if dto.is_active == Some(false) {
                return Err(DomainError::Forbidden(
                    "You cannot deactivate your own account".into(),
                ));
            }
            if matches!(dto.role, Some(role) if role != UserRole::Admin) {
                return Err(DomainError::Forbidden(
                    "You cannot remove your own admin role".into(),
                ));
            }
        }
        if matches!(&dto.email, Some(email) if !email.contains('@')) {
            return Err(DomainError::Validation("Invalid email address".into()));
        }

        let user = self
            .repos
            .users()
            .update_user(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;
        info!(user_id = %user.id, actor_id, "Staff account updated");
        Ok(user)
    }

    // ── Password reset ──────────────────────────────────────────

    /// Issue a one-time code for the account with this email. Unknown or
    /// inactive accounts succeed silently so the endpoint cannot be used to
    /// probe for addresses.
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<()> {
        let Some(user) = self.repos.users().get_user_by_email(email.trim()).await? else {
            info!("Password reset requested for unknown email");
            return Ok(());
        };
        if !user.is_active {
            return Ok(());
        }

        let code = generate_otp();
        let expires_at = Utc::now() + self.otp_ttl;
        self.repos
            .password_resets()
            .create(&user.id, &hash_otp(&code), expires_at)
            .await?;

        self.notifier
            .send(Notification {
                channel: NotificationChannel::Email,
                recipient: user.email.clone(),
                subject: "Password reset code".into(),
                body: format!(
                    "Your password reset code is {}. It expires in {} minutes.",
                    code,
                    self.otp_ttl.num_minutes()
                ),
            })
            .await?;

        info!(user_id = %user.id, "Password reset code issued");
        Ok(())
    }

    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        check_password_length(new_password)?;
        let invalid = || DomainError::Validation("Invalid or expired reset code".into());

        let user = self
            .repos
            .users()
            .get_user_by_email(email.trim())
            .await?
            .ok_or_else(invalid)?;

        let now = Utc::now();
        let otp_hash = hash_otp(otp);
        let resets = self.repos.password_resets();
        let Some(reset) = resets
            .find_usable(&user.id, now)
            .await?
            .into_iter()
            .find(|r| r.otp_hash == otp_hash)
        else {
            resets.record_failed_attempt(&user.id, now).await?;
            warn!(user_id = %user.id, "Wrong password reset code");
            return Err(invalid());
        };

        // Losing the race to a concurrent reset counts as an already used code
        if !resets.consume(reset.id, now).await? {
            return Err(invalid());
        }

        self.repos
            .users()
            .update_user_password(&user.id, &hash(new_password)?)
            .await?;
        info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }

    // ── Bootstrap ───────────────────────────────────────────────

    /// Create the configured admin when no accounts exist yet.
    pub async fn ensure_default_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        if self.repos.users().count_users().await? > 0 {
            return Ok(None);
        }
        let user = self
            .create_staff(CreateStaff {
                username: username.to_string(),
                email: email.to_string(),
                phone: None,
                role: UserRole::Admin,
                password: password.to_string(),
            })
            .await?;
        warn!(
            username = %user.username,
            "Default admin account created; change its password"
        );
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::user::MAX_OTP_ATTEMPTS;
    use crate::infrastructure::crypto::jwt::verify_token;
    use crate::infrastructure::database::test_support::{fixture, memory_repos, STAFF_PASSWORD};

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<Notification>>,
    }

    impl RecordingSender {
        fn last_code(&self) -> String {
            let sent = self.sent.lock().unwrap();
            let body = &sent.last().expect("a notification").body;
            body.split_whitespace()
                .find(|w| w.len() == 7 && w.ends_with('.'))
                .map(|w| w.trim_end_matches('.').to_string())
                .expect("code in body")
        }
    }

    #[async_trait]
    impl NotificationSender for RecordingSender {
        async fn send(&self, notification: Notification) -> DomainResult<()> {
            self.sent.lock().unwrap().push(notification);
            Ok(())
        }
    }

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            expiration_hours: 1,
            issuer: "hotel-service".into(),
        }
    }

    fn service(repos: Arc<dyn RepositoryProvider>, sender: Arc<RecordingSender>) -> UserService {
        UserService::new(repos, sender, jwt(), 15)
    }

    #[tokio::test]
    async fn login_by_username_or_email() {
        let f = fixture().await;
        let svc = service(f.repos.clone(), Arc::default());

        let auth = svc.login("frontdesk", STAFF_PASSWORD).await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.expires_in, 3600);
        let claims = verify_token(&auth.token, &jwt()).unwrap();
        assert_eq!(claims.sub, f.staff.id);
        assert_eq!(claims.role, "receptionist");

        svc.login("frontdesk@example.com", STAFF_PASSWORD).await.unwrap();
        let me = svc.me(&f.staff.id).await.unwrap();
        assert!(me.last_login_at.is_some());

        let err = svc.login("frontdesk", "wrong-password").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
        let err = svc.login("nobody", STAFF_PASSWORD).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn disabled_accounts_cannot_log_in() {
        let f = fixture().await;
        let svc = service(f.repos.clone(), Arc::default());
        let admin = svc
            .create_staff(CreateStaff {
                username: "admin".into(),
                email: "admin@example.com".into(),
                phone: None,
                role: UserRole::Admin,
                password: "admin-pass".into(),
            })
            .await
            .unwrap();

        svc.update_staff(
            &admin.id,
            &f.staff.id,
            UpdateUserDto {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = svc.login("frontdesk", STAFF_PASSWORD).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn admin_cannot_demote_or_deactivate_self() {
        let repos = memory_repos().await;
        let svc = service(repos, Arc::default());
        let admin = svc
            .ensure_default_admin("admin", "admin@example.com", "admin-pass")
            .await
            .unwrap()
            .unwrap();

        for dto in [
            UpdateUserDto {
                is_active: Some(false),
                ..Default::default()
            },
            UpdateUserDto {
                role: Some(UserRole::Manager),
                ..Default::default()
            },
        ] {
            let err = svc.update_staff(&admin.id, &admin.id, dto).await.unwrap_err();
            assert!(matches!(err, DomainError::Forbidden(_)));
        }

        let updated = svc
            .update_staff(
                &admin.id,
                &admin.id,
                UpdateUserDto {
                    phone: Some("+100".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.phone.as_deref(), Some("+100"));
    }

    #[tokio::test]
    async fn default_admin_is_created_once() {
        let repos = memory_repos().await;
        let svc = service(repos, Arc::default());
        let first = svc
            .ensure_default_admin("admin", "admin@example.com", "admin-pass")
            .await
            .unwrap();
        assert_eq!(first.unwrap().role, UserRole::Admin);
        let second = svc
            .ensure_default_admin("admin", "admin@example.com", "admin-pass")
            .await
            .unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn create_staff_rejects_duplicates_and_short_passwords() {
        let f = fixture().await;
        let svc = service(f.repos.clone(), Arc::default());
        let base = CreateStaff {
            username: "frontdesk".into(),
            email: "other@example.com".into(),
            phone: None,
            role: UserRole::Receptionist,
            password: "long-enough".into(),
        };

        let err = svc.create_staff(base.clone()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let err = svc
            .create_staff(CreateStaff {
                username: "newbie".into(),
                password: "short".into(),
                ..base.clone()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let user = svc
            .create_staff(CreateStaff {
                username: "newbie".into(),
                ..base
            })
            .await
            .unwrap();
        assert!(svc.login("newbie", "long-enough").await.is_ok());
        assert_eq!(svc.get_staff(&user.id).await.unwrap().username, "newbie");
    }

    #[tokio::test]
    async fn change_password_requires_current_password() {
        let f = fixture().await;
        let svc = service(f.repos.clone(), Arc::default());

        let err = svc
            .change_password(&f.staff.id, "not-it", "brand-new-pass")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        svc.change_password(&f.staff.id, STAFF_PASSWORD, "brand-new-pass")
            .await
            .unwrap();
        assert!(svc.login("frontdesk", "brand-new-pass").await.is_ok());
    }

    #[tokio::test]
    async fn reset_code_is_single_use() {
        let f = fixture().await;
        let sender = Arc::new(RecordingSender::default());
        let svc = service(f.repos.clone(), sender.clone());

        svc.request_password_reset("frontdesk@example.com").await.unwrap();
        let code = sender.last_code();
        assert_eq!(
            sender.sent.lock().unwrap()[0].recipient,
            "frontdesk@example.com"
        );

        let err = svc
            .reset_password("frontdesk@example.com", "000000x", "reset-password")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        svc.reset_password("frontdesk@example.com", &code, "reset-password")
            .await
            .unwrap();
        assert!(svc.login("frontdesk", "reset-password").await.is_ok());

        let err = svc
            .reset_password("frontdesk@example.com", &code, "another-password")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn reset_for_unknown_email_is_silent() {
        let f = fixture().await;
        let sender = Arc::new(RecordingSender::default());
        let svc = service(f.repos.clone(), sender.clone());

        svc.request_password_reset("ghost@example.com").await.unwrap();
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn expired_codes_are_rejected() {
        let f = fixture().await;
        let sender = Arc::new(RecordingSender::default());
        let svc = UserService::new(f.repos.clone(), sender.clone(), jwt(), 0);

        svc.request_password_reset("frontdesk@example.com").await.unwrap();
        let code = sender.last_code();
        let err = svc
            .reset_password("frontdesk@example.com", &code, "reset-password")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn repeated_wrong_codes_void_outstanding_codes() {
        let f = fixture().await;
        let sender = Arc::new(RecordingSender::default());
        let svc = service(f.repos.clone(), sender.clone());

        svc.request_password_reset("frontdesk@example.com").await.unwrap();
        let code = sender.last_code();
        let wrong = if code == "000000" { "111111" } else { "000000" };

        for _ in 0..MAX_OTP_ATTEMPTS {
            let err = svc
                .reset_password("frontdesk@example.com", wrong, "reset-password")
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
        let err = svc
            .reset_password("frontdesk@example.com", &code, "reset-password")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        svc.request_password_reset("frontdesk@example.com").await.unwrap();
        let fresh = sender.last_code();
        svc.reset_password("frontdesk@example.com", &fresh, "reset-password")
            .await
            .unwrap();
        assert!(svc.login("frontdesk", "reset-password").await.is_ok());
    }

    #[tokio::test]
    async fn corrupt_password_hash_is_a_failed_login() {
        let f = fixture().await;
        f.repos
            .users()
            .update_user_password(&f.staff.id, "not-a-bcrypt-hash")
            .await
            .unwrap();
        let svc = service(f.repos.clone(), Arc::default());

        let err = svc.login("frontdesk", STAFF_PASSWORD).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }
}
